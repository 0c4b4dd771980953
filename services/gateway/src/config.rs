//! Gateway configuration
//!
//! Built once at startup and immutable afterwards. Every field has a
//! default; environment variables override them.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use types::category::AllowList;
use types::errors::CategoryError;

pub const ENV_LISTEN_ADDR: &str = "EVENTS_LISTEN_ADDR";
pub const ENV_CAPACITY: &str = "EVENTS_CAPACITY";
pub const ENV_CATEGORIES: &str = "EVENTS_CATEGORIES";
pub const ENV_DATABASE_PATH: &str = "EVENTS_DATABASE_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("invalid category list: {0}")]
    Categories(#[from] CategoryError),
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// Maximum registrations in flight at once.
    pub capacity: usize,
    /// Allow-listed category names.
    pub categories: Vec<String>,
    /// SQLite database file.
    pub database_path: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8082)),
            capacity: 3,
            categories: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            database_path: PathBuf::from("events.db"),
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `EVENTS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LISTEN_ADDR) {
            config.listen_addr = raw.parse().map_err(|e| ConfigError::Invalid {
                name: ENV_LISTEN_ADDR,
                reason: format!("{raw:?}: {e}"),
            })?;
        }

        if let Some(raw) = lookup(ENV_CAPACITY) {
            config.capacity = raw.parse().map_err(|e| ConfigError::Invalid {
                name: ENV_CAPACITY,
                reason: format!("{raw:?}: {e}"),
            })?;
        }

        if let Some(raw) = lookup(ENV_CATEGORIES) {
            config.categories = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(raw) = lookup(ENV_DATABASE_PATH) {
            config.database_path = PathBuf::from(raw);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_CAPACITY,
                reason: "capacity must be at least 1".to_string(),
            });
        }
        let allow_list = self.allow_list()?;
        if allow_list.is_empty() {
            return Err(ConfigError::Invalid {
                name: ENV_CATEGORIES,
                reason: "at least one category is required".to_string(),
            });
        }
        Ok(())
    }

    pub fn allow_list(&self) -> Result<AllowList, CategoryError> {
        AllowList::new(self.categories.iter().cloned())
    }
}
