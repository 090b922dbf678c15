//! Server configuration from environment variables.
//!
//! | variable            | default        |
//! |---------------------|----------------|
//! | `CURRICULA_STORE`   | `sqlite`       |
//! | `CURRICULA_DB_PATH` | `curricula.db` |
//! | `CURRICULA_HOST`    | `0.0.0.0`      |
//! | `CURRICULA_PORT`    | `3000`         |
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use std::sync::Arc;

use curricula_storage::{InMemoryStore, KvStore, SqliteStore, StorageError};

pub const STORE_VAR: &str = "CURRICULA_STORE";
pub const DB_PATH_VAR: &str = "CURRICULA_DB_PATH";
pub const HOST_VAR: &str = "CURRICULA_HOST";
pub const PORT_VAR: &str = "CURRICULA_PORT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which [`KvStore`] backend the server opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub store: StoreBackend,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup(STORE_VAR).as_deref().unwrap_or("sqlite") {
            "sqlite" => StoreBackend::Sqlite {
                path: lookup(DB_PATH_VAR).unwrap_or_else(|| "curricula.db".to_string()),
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    var: STORE_VAR,
                    value: other.to_string(),
                    reason: "expected 'sqlite' or 'memory'".to_string(),
                })
            }
        };

        let host = lookup(HOST_VAR).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => 3000,
        };

        Ok(ServerConfig { store, host, port })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Opens the configured backend. Called once at process start.
    pub fn open_store(&self) -> Result<Arc<dyn KvStore>, StorageError> {
        let store: Arc<dyn KvStore> = match &self.store {
            StoreBackend::Sqlite { path } => Arc::new(SqliteStore::new(path)?),
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        };
        Ok(store)
    }
}
