//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DataSettings, LoggingConfig, MarketSettings, ValidationError,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// The file is optional; anything it leaves out falls back to the defaults.
/// `SWING__SECTION__KEY` environment variables override both, with
/// `SWING__MARKET__SYMBOLS` taken as a comma-separated list.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    load_with(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix("SWING")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("market.symbols")
        .try_parsing(true)
}

fn load_with(path: &Path, environment: Environment) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(environment)
        .build()?;

    config.try_deserialize()
}
