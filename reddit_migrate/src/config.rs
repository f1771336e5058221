//! Configuration handling for reddit_migrate
//!
//! Connection settings come from the process environment (optionally seeded from a
//! `.env` file). Run options come from the command line.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable holding the Supabase project URL
pub const URL_VAR: &str = "VITE_SUPABASE_URL";
/// Preferred credential
pub const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
/// Fallback credential
pub const ANON_KEY_VAR: &str = "VITE_SUPABASE_ANON_KEY";

/// Load `.env` from the working directory if one exists.
///
/// Variables already present in the environment are left untouched. A missing file
/// is not an error; a file that fails to parse is.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    let path = PathBuf::from(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::ConfigError(format!(
            "Failed to load {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Connection configuration for the Supabase project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: Option<String>,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let supabase_url = non_empty(URL_VAR)
            .ok_or_else(|| Error::ConfigError(format!("{} environment variable not set", URL_VAR)))?;

        let supabase_key = non_empty(SERVICE_ROLE_KEY_VAR).or_else(|| non_empty(ANON_KEY_VAR));

        Ok(Self {
            supabase_url,
            supabase_key,
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for this crate; `None` leaves `RUST_LOG` in charge when it is set
    pub level: Option<String>,
    pub file: Option<String>,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            format: "text".to_string(),
        }
    }
}
