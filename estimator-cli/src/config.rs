//! Settings file for the terminal estimator.
//!
//! Every key is optional; command-line flags override what the file says.
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! timeout_secs = 120
//!
//! [session]
//! indicator_policy = "gated"   # or "free"
//! ack_delay = 3.0              # seconds
//!
//! [database]
//! backend = "sqlite"
//! connection = "estimator.db"
//!
//! [logging]
//! level = "warn"
//! file = "estimator.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use estimator_core::SessionOptions;
use estimator_core::db::DbConfig;
use estimator_http::ApiConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionOptions,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSettings {
    pub backend: String,
    pub connection: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection: "estimator.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Bare level or full `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Settings {
    pub fn parse(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Reads `path` when given; defaults otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::default();
        if let Some(base_url) = &self.api.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = self.api.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.database.backend.clone(),
            connection_string: self.database.connection.clone(),
        }
    }
}
