use std::sync::Arc;

use putting_core::error::CoreError;
use putting_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. `None` when storage is not configured.
    pub pool: Option<DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// The pool, or [`CoreError::StorageUnavailable`] when storage is off.
    pub fn db(&self) -> Result<&DbPool, CoreError> {
        self.pool
            .as_ref()
            .ok_or_else(|| CoreError::StorageUnavailable("Database not configured".into()))
    }

    /// The requested season, falling back to the configured default.
    pub fn season_or_default(&self, requested: Option<String>) -> String {
        requested
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.config.default_season.clone())
    }
}
