/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The optional database pool
 * - The shared CORS origin resolver
 * - The loaded server configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`. The CORS
 * middleware and the admin endpoints only ever see `Arc<OriginResolver>`.
 *
 * # Example
 *
 * ```rust,ignore
 * use chatbox_saas::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let origins = state.origins.get_allowed_origins().await;
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::origins::OriginResolver;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - Optional PostgreSQL connection pool
/// * `origins` - The process-wide CORS origin resolver
/// * `config` - Server configuration loaded at startup
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if
    /// `DATABASE_URL` environment variable is not set). Handlers should
    /// check for `None` before using the database.
    pub db_pool: Option<PgPool>,

    /// CORS origin resolver
    ///
    /// One instance per process. Chatbox mutations call `refresh()` on it
    /// so new tenant domains are allowed without waiting for the cache TTL.
    pub origins: Arc<OriginResolver>,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Get the database pool or a 503 error
    pub fn pool(&self) -> Result<&PgPool, crate::backend::error::BackendError> {
        self.db_pool
            .as_ref()
            .ok_or(crate::backend::error::BackendError::DatabaseUnavailable)
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for the origin resolver
impl FromRef<AppState> for Arc<OriginResolver> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.origins.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
