use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    recipe_finder::cli::run().await
}
