//! Log setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Parse log level string to tracing Level.
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize file logging at `path`, truncating any previous run's log.
///
/// `RUST_LOG` directives are honoured on top of `level`.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let level = parse_level(level);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let log_file = Arc::new(File::create(path)?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Warning"), Level::WARN);
    }

    #[test]
    fn parse_level_defaults_to_info() {
        assert_eq!(parse_level("loud"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }
}
