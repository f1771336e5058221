//! Logging utilities for reddit_migrate
//!
//! Log output never goes to stdout; stdout carries the progress report.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Build the filter from `RUST_LOG` and the configured level.
///
/// An explicit level always applies to this crate. Without one, `RUST_LOG` decides,
/// and only when that is unset does the crate default to `warn`.
fn build_filter(config: &LoggingConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    let rust_log = rust_log.filter(|directives| !directives.trim().is_empty());
    let filter = match rust_log {
        Some(directives) => EnvFilter::builder().parse_lossy(directives),
        None => EnvFilter::default(),
    };

    let level = match (&config.level, rust_log) {
        (Some(level), _) => parse_level(level),
        (None, None) => Level::WARN,
        (None, Some(_)) => return Ok(filter),
    };

    let directive = format!("reddit_migrate={}", level)
        .parse()
        .map_err(|e| Error::LoggingError(format!("Invalid log directive: {}", e)))?;
    Ok(filter.add_directive(directive))
}

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(config, rust_log.as_deref())?;
    let json = config.format.eq_ignore_ascii_case("json");
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);

    let result = match (&config.file, json) {
        (Some(file_path), json) => {
            if let Some(parent) = Path::new(file_path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::LoggingError(e.to_string()))?;
            }
            let file = File::create(file_path).map_err(|e| Error::LoggingError(e.to_string()))?;
            let builder = builder.with_writer(Mutex::new(file)).with_ansi(false);
            if json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(builder.finish())
            }
        }
        (None, true) => tracing::subscriber::set_global_default(
            builder.with_writer(std::io::stderr).json().finish(),
        ),
        (None, false) => {
            tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())
        }
    };

    result.map_err(|e| Error::LoggingError(e.to_string()))
}
