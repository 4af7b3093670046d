mod cli;
mod config;
mod deadline;
mod i18n;
mod models;
mod submission;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use ui::App;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Load configuration
    let config = Config::load(&cli).context("Failed to load configuration")?;

    // Load the embedded translation catalog
    let catalog = i18n::Catalog::load().context("Failed to load translation catalog")?;

    // Start TUI application
    let mut app = App::new(config, catalog);
    app.run().await?;

    Ok(())
}
