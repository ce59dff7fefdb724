/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layer Order
 *
 * From the outside in:
 * 1. `TraceLayer` - request/response spans
 * 2. CORS middleware - rejects disallowed origins and answers preflights
 *    before routing runs
 * 3. Routes, with `auth_middleware` on owner routes only
 */

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::backend::middleware::cors::cors_middleware;
use crate::backend::origins::handlers::{list_cors_origins, refresh_cors};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::backend::widget::embed_script;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the pool, resolver and config
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Route Details
///
/// ## Operational
///
/// - `GET /health` - Liveness probe
/// - `POST /refresh-cors` - Force the origin cache to repopulate
/// - `GET /cors-origins` - Current allowlist
///
/// ## Widget
///
/// - `GET /widget/{id}/embed.js` - Loader script for an active chatbox
///
/// ## API
///
/// See `api_routes`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/refresh-cors", post(refresh_cors))
        .route("/cors-origins", get(list_cors_origins))
        .route("/widget/{id}/embed.js", get(embed_script));

    let router = configure_api_routes(router, &app_state);

    let router = router.fallback(|| async {
        crate::backend::error::BackendError::handler(
            axum::http::StatusCode::NOT_FOUND,
            "Not found",
        )
    });

    router
        .layer(middleware::from_fn_with_state(
            app_state.origins.clone(),
            cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
