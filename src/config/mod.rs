//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! environment variables, then command-line flags (applied by the binary).
//!
//! | Variable                  | Field           |
//! |---------------------------|-----------------|
//! | `MEALFINDER_API_BASE`     | `api_base_url`  |
//! | `MEALFINDER_TIMEOUT_SECS` | `timeout_secs`  |
//! | `MEALFINDER_USER_AGENT`   | `user_agent`    |

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::api::Endpoints;

/// Public TheMealDB endpoint using the free test key.
pub const DEFAULT_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1";

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the four endpoints are resolved against.
    pub api_base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
            user_agent: concat!("mealfinder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Apply `MEALFINDER_*` overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored; an unparsable timeout is logged and ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base) = get("MEALFINDER_API_BASE") {
            self.api_base_url = base;
        }
        if let Some(raw) = get("MEALFINDER_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "ignoring invalid MEALFINDER_TIMEOUT_SECS"),
            }
        }
        if let Some(agent) = get("MEALFINDER_USER_AGENT") {
            self.user_agent = agent;
        }
        self
    }

    /// Resolve the configured base URL into endpoint builders.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Endpoints::new(&self.api_base_url)
    }
}
