//! Logging setup.

use std::path::{Path, PathBuf};
use swing_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Setup logging from the logging configuration.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// With `file` set, a plain-text copy is also written there; keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn setup_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_lowercase()));

    let (file_layer, guard) = match config.file.as_deref() {
        Some(path) => {
            let (dir, file_name) = file_target(path);
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if config.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }

    guard
}

/// Split a log file path into its directory and file name.
fn file_target(path: &str) -> (PathBuf, PathBuf) {
    let path = Path::new(path);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("swing.log"));
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_target() {
        assert_eq!(
            file_target("logs/swing.log"),
            (PathBuf::from("logs"), PathBuf::from("swing.log"))
        );
        assert_eq!(
            file_target("refresh.log"),
            (PathBuf::from("."), PathBuf::from("refresh.log"))
        );
        assert_eq!(file_target("logs/").1, PathBuf::from("logs"));
    }
}
