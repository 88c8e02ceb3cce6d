//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "swing")]
#[command(author, version, about = "Entry-indicator capture and live position refresh for a swing-trading dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh open positions against live prices
    Refresh(RefreshArgs),
    /// Capture entry indicators and optionally annotate a trade
    Capture(CaptureArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RefreshArgs {
    /// Portfolio document (defaults to data.portfolio_path)
    #[arg(short, long)]
    pub portfolio: Option<PathBuf>,

    /// Price for a symbol, SYMBOL=PRICE (repeatable); skips the live fetch
    #[arg(long = "price", value_name = "SYMBOL=PRICE")]
    pub prices: Vec<String>,

    /// JSON file of {"SYMBOL": price}; skips the live fetch
    #[arg(long)]
    pub prices_file: Option<PathBuf>,

    /// Compute and print without saving
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct CaptureArgs {
    /// Entry price
    #[arg(short, long)]
    pub entry_price: f64,

    /// Quote record JSON file
    #[arg(short, long)]
    pub quote: PathBuf,

    /// Technical record JSON file
    #[arg(short, long)]
    pub technical: Option<PathBuf>,

    /// Sector record JSON file
    #[arg(short, long)]
    pub sector: Option<PathBuf>,

    /// Trade to annotate with the snapshot
    #[arg(long)]
    pub trade_id: Option<String>,

    /// Trades file (defaults to data.trades_path)
    #[arg(long)]
    pub trades: Option<PathBuf>,
}
