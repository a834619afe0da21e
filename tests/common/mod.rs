//! Common test utilities: a scripted transport and settings fixtures

#![allow(dead_code)]

use recipe_finder::config::SearchSettings;
use recipe_finder::search::{RecipeSearch, SearchError, Transport, TransportResponse};
use std::sync::{Arc, Mutex};

/// What the fake transport does when called
pub enum Reply {
    Respond(TransportResponse),
    Fail(String),
    Panic,
}

/// Transport that replays a fixed reply and records every requested URL
pub struct FakeTransport {
    reply: Reply,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new(Reply::Respond(TransportResponse::new(200, body)))
    }

    pub fn status(status: u16) -> Arc<Self> {
        Self::new(Reply::Respond(TransportResponse::new(status, "{\"error\": {}}")))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(Reply::Fail(message.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, SearchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(SearchError::Network(message.clone())),
            Reply::Panic => panic!("transport exploded"),
        }
    }
}

/// Settings with both credentials present
pub fn configured_settings() -> SearchSettings {
    SearchSettings {
        api_key: Some("test-api-key".to_string()),
        search_engine_id: Some("test-cx".to_string()),
        ..Default::default()
    }
}

/// Search service over `transport` with credentials configured
pub fn configured_search(transport: Arc<FakeTransport>) -> RecipeSearch {
    RecipeSearch::new(&configured_settings(), transport)
}

/// Search service over `transport` with no credentials
pub fn unconfigured_search(transport: Arc<FakeTransport>) -> RecipeSearch {
    RecipeSearch::new(&SearchSettings::default(), transport)
}
