//! recipe-finder library
//!
//! Ingredient-driven recipe search: query construction, provider response
//! normalization with a deterministic mock fallback, and a terminal UI.

pub mod actions;
pub mod cli;
pub mod config;
pub mod event;
pub mod ingredients;
pub mod logging;
pub mod search;
pub mod session;
pub mod tui;
