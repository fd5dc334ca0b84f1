//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// Shared resources handed to every request handler.
///
/// The storage layer is injected here rather than constructed at module
/// scope, so tests can seed their own backend.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Bearer token verification
    pub auth: Arc<AuthSystem>,
    /// Document store facade
    pub storage: Arc<StorageLayer>,
}

impl AppState {
    pub fn new(config: Config, auth: AuthSystem, storage: StorageLayer) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage: Arc::new(storage),
        }
    }
}
