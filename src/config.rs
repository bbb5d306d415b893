//! Startup configuration: which backend serves the leaderboard, and where
//! its data lives.

use std::path::Path;
use std::sync::Arc;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::db::DieselRepository;
use crate::fixture::FixtureRepository;
use crate::repository::LeaderboardRepository;

/// Selects and parameterizes the storage backend.
///
/// Loaded from a TOML file at process start; the rest of the system only
/// ever sees the finished [`LeaderboardRepository`] instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Backend kind: `"fixture"` or `"sqlite"`.
    backend: String,

    /// Path to the scores JSON document (fixture backend).
    #[serde(default)]
    scores_path: Option<String>,

    /// Path to the profiles JSON document (fixture backend).
    #[serde(default)]
    profiles_path: Option<String>,

    /// Path to the SQLite database file (sqlite backend).
    #[serde(default)]
    database_path: Option<String>,

    /// Page size the presentation layer uses when none is requested.
    #[serde(default = "default_page_size")]
    default_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl LeaderboardConfig {
    /// Configuration for the fixture backend over the given JSON documents.
    pub fn fixture(scores_path: impl Into<String>, profiles_path: impl Into<String>) -> Self {
        Self {
            backend: "fixture".to_string(),
            scores_path: Some(scores_path.into()),
            profiles_path: Some(profiles_path.into()),
            database_path: None,
            default_page_size: default_page_size(),
        }
    }

    /// Configuration for the SQLite backend over the given database file.
    pub fn sqlite(database_path: impl Into<String>) -> Self {
        Self {
            backend: "sqlite".to_string(),
            scores_path: None,
            profiles_path: None,
            database_path: Some(database_path.into()),
            default_page_size: default_page_size(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {e}")))?;

        info!(backend = %config.backend, "Config loaded successfully");
        Ok(config)
    }

    /// Page size used when the caller does not request one.
    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Builds the configured repository, ready to hand to the aggregator.
    ///
    /// The `STELLAR_DATABASE_PATH` environment variable overrides the
    /// configured database path for the sqlite backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown backend kind, missing
    /// parameters, or a fixture dataset that fails to load.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub fn build_repository(&self) -> Result<Arc<dyn LeaderboardRepository>, ConfigError> {
        match self.backend.as_str() {
            "fixture" => {
                let scores_path = self.scores_path.as_deref().ok_or_else(|| {
                    ConfigError::new("fixture backend requires scores_path".to_string())
                })?;
                let profiles_path = self.profiles_path.as_deref().ok_or_else(|| {
                    ConfigError::new("fixture backend requires profiles_path".to_string())
                })?;
                let repository = FixtureRepository::load(scores_path, profiles_path)
                    .map_err(|e| ConfigError::new(format!("Failed to load fixture data: {e}")))?;
                Ok(Arc::new(repository))
            }
            "sqlite" => {
                let database_path = match std::env::var("STELLAR_DATABASE_PATH") {
                    Ok(path) => path,
                    Err(_) => self
                        .database_path
                        .clone()
                        .ok_or_else(|| {
                            ConfigError::new(
                                "sqlite backend requires database_path".to_string(),
                            )
                        })?,
                };
                Ok(Arc::new(DieselRepository::new(database_path)))
            }
            other => Err(ConfigError::new(format!("Unknown backend '{other}'"))),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
