/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool
 * 2. Build the static allowlist and the tenant domain store
 * 3. Create the process-wide origin resolver
 * 4. Warm the origin cache so the first browser request does not pay for it
 * 5. Create and configure the router
 */

use axum::Router;
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::origins::{
    ChatboxDomainStore, OriginResolver, StaticOrigins, SystemClock, TenantDomainSource,
    DEFAULT_CACHE_TTL,
};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Server configuration loaded from the environment
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// - Missing database: server continues without database features and the
///   CORS allowlist holds only its static part
/// - Migration failures: logged but don't prevent startup
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing chatbox backend server");

    let db_pool = load_database(&config).await;
    let store = Arc::new(ChatboxDomainStore::new(db_pool.clone()));

    let app_state = build_state(config, db_pool, store);

    let warmed = app_state.origins.get_allowed_origins().await;
    tracing::info!("CORS allowlist warmed with {} origins", warmed.len());

    create_router(app_state)
}

/// Assemble `AppState` around an arbitrary tenant domain source
///
/// Integration tests use this with an in-memory source and no pool.
pub fn build_state(
    config: ServerConfig,
    db_pool: Option<PgPool>,
    store: Arc<dyn TenantDomainSource>,
) -> AppState {
    let statics = StaticOrigins::from_settings(&config.cors);
    let ttl = cache_ttl(config.cors.cache_ttl_secs);

    tracing::info!(
        static_origins = statics.list().len(),
        ttl_secs = ttl.num_seconds(),
        "Origin resolver configured"
    );

    let origins = Arc::new(OriginResolver::with_clock(
        statics,
        store,
        Arc::new(SystemClock),
        ttl,
    ));

    AppState {
        db_pool,
        origins,
        config: Arc::new(config),
    }
}

fn cache_ttl(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(DEFAULT_CACHE_TTL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_ttl_from_seconds() {
        assert_eq!(cache_ttl(300), Duration::minutes(5));
        assert_eq!(cache_ttl(0), Duration::zero());
    }

    #[test]
    fn test_cache_ttl_out_of_range_uses_default() {
        assert_eq!(cache_ttl(u64::MAX), DEFAULT_CACHE_TTL);
    }
}
