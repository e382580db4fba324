//! Scrape run configuration.
//!
//! Everything a run needs is passed around explicitly from one
//! [`FeedConfig`], loaded from a JSON file:
//!
//! ```json
//! {
//!   "service_id": "DAILY",
//!   "bikes_allowed": "allowed",
//!   "stops_path": "stops.json",
//!   "routes": [
//!     { "route_id": "PORTLAND_BOS", "url": "https://example.com/route/portland-boston/" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{BikesAllowed, RouteContext, RouteId};
use crate::fetch::FetchConfig;
use crate::html::TableLayout;

/// Environment variable naming the config file when no argument is given.
pub const CONFIG_ENV_VAR: &str = "TRIP_SCRAPER_CONFIG";

/// Errors loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for this schema
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The configuration parsed but is unusable
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One route page to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteSource {
    pub route_id: RouteId,
    pub url: String,
}

/// Configuration for a scrape run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedConfig {
    /// Service calendar id stamped on every trip.
    pub service_id: String,

    /// Default bikes_allowed for every trip.
    #[serde(default)]
    pub bikes_allowed: BikesAllowed,

    /// Path to the stop directory JSON. Relative paths are resolved
    /// against the config file's directory.
    pub stops_path: PathBuf,

    /// Route pages, in output order.
    pub routes: Vec<RouteSource>,

    /// HTTP settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Where the timetables sit in a page.
    #[serde(default)]
    pub layout: TableLayout,
}

impl FeedConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig = serde_json::from_str(json).map_err(|e| ConfigError::Json {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&contents)?;
        if config.stops_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.stops_path = dir.join(&config.stops_path);
            }
        }
        Ok(config)
    }

    /// Check the invariants serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_id.trim().is_empty() {
            return Err(ConfigError::Invalid("service_id must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            if route.url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "route {} has an empty url",
                    route.route_id
                )));
            }
            if !seen.insert(&route.url) {
                return Err(ConfigError::Invalid(format!(
                    "url {} is listed more than once",
                    route.url
                )));
            }
        }
        Ok(())
    }

    /// The per-route context for a configured route.
    pub fn route_context(&self, route: &RouteSource) -> RouteContext {
        RouteContext::new(route.route_id.clone(), self.service_id.clone(), self.bikes_allowed)
    }
}

/// Pick the config path: the first CLI argument, else the environment.
pub fn config_path(arg: Option<String>) -> Result<PathBuf, ConfigError> {
    arg.or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .map(PathBuf::from)
        .ok_or_else(|| {
            ConfigError::Invalid(format!(
                "no config file given; pass a path or set {CONFIG_ENV_VAR}"
            ))
        })
}
