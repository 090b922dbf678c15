//! Application state shared by all handlers.
//!
//! The store handle is built once at process start and injected here; there
//! is no global client and no lazy reinitialization. `CatalogService` holds no
//! mutable state of its own, so it is shared behind a plain `Arc` and handlers
//! run fully concurrently.
//!
//! Store calls are synchronous. Handlers go through [`AppState::call`], which
//! runs them on tokio's blocking pool so a slow SQLite write never stalls the
//! async workers.

use std::sync::Arc;

use curricula_storage::{InMemoryStore, KvStore, StorageError};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::service::CatalogService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CatalogService>,
}

impl AppState {
    /// Wraps an already opened store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        AppState {
            service: Arc::new(CatalogService::new(store)),
        }
    }

    /// Opens the backend named by `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StorageError> {
        Ok(Self::new(config.open_store()?))
    }

    /// Creates a new `AppState` over an empty in-memory store (for testing).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Runs one service call on the blocking pool and awaits its result.
    pub async fn call<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&CatalogService) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || f(&service))
            .await
            .map_err(|e| ApiError::InternalError(format!("service task failed: {}", e)))?
    }
}
