//! Swing dashboard CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use swing_config::load_config;
use swing_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config).await;
    }

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Command line flags win over the file
    if let Some(level) = cli.log_level {
        config.logging.level = level.as_str().to_string();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    let _guard = setup_logging(&config.logging);

    // Execute command
    match cli.command {
        Commands::Refresh(args) => cli::commands::refresh::run(args, &config).await,
        Commands::Capture(args) => cli::commands::capture::run(args, &config).await,
        Commands::ValidateConfig => Ok(()),
    }
}
