use crate::actions::{self, SearchReport};
use crate::config::{self, Config};
use crate::ingredients::IngredientList;
use crate::logging;
use crate::search::{RecipeSearch, SearchResult};
use crate::tui::{self, App};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Find recipes for the ingredients you have
#[derive(Debug, Parser)]
#[command(name = "recipe-finder", version, about)]
pub struct Cli {
    /// Ingredients to search with; opens the terminal UI when omitted
    pub ingredients: Vec<String>,

    /// Print results as JSON (one-shot mode only)
    #[arg(long)]
    pub json: bool,

    /// Write debug logs regardless of the config file
    #[arg(long)]
    pub debug: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Parse arguments and run
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    if cli.debug {
        config.debug = true;
    }

    let _log_guard = logging::init(&config)?;

    let searcher = RecipeSearch::from_settings(&config.search)
        .context("Failed to initialize recipe search")?;
    let searcher = Arc::new(searcher);

    if cli.ingredients.is_empty() {
        tui::run(App::new(searcher)).await
    } else {
        search_once(searcher, &cli.ingredients, cli.json).await
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            let mut config = config::load_or_create_config_at(path)?;
            config.apply_env();
            Ok(config)
        }
        None => config::load_or_create_config(),
    }
}

async fn search_once(searcher: Arc<RecipeSearch>, raw: &[String], json: bool) -> Result<()> {
    let mut ingredients = IngredientList::new();
    for ingredient in raw {
        ingredients.add(ingredient);
    }
    if ingredients.is_empty() {
        anyhow::bail!("No ingredients given");
    }

    let SearchReport { results, notice } =
        actions::search_recipes(searcher, ingredients.query_string()).await;

    if let Some(notice) = &notice {
        eprintln!("{}", notice.message());
    }

    if json {
        let output = serde_json::to_string_pretty(&results)
            .context("Failed to serialize results")?;
        println!("{}", output);
    } else if !results.is_empty() {
        println!("{}\n", ingredients.heading());
        print!("{}", format_cards(&results));
    }

    Ok(())
}

/// Plain-text rendering of result cards
pub fn format_cards(results: &[SearchResult]) -> String {
    let mut output = String::new();
    for (idx, result) in results.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", idx + 1, result.title));
        if !result.snippet.is_empty() {
            output.push_str(&format!("   {}\n", result.snippet));
        }
        output.push_str(&format!("   {}\n", result.link));
        output.push_str(&format!("   画像: {}\n\n", result.image_or_placeholder()));
    }
    output
}
