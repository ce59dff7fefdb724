/**
 * CORS Admin Handlers
 *
 * - `POST /refresh-cors` - invalidate and repopulate the origin cache
 * - `GET /cors-origins` - debug view of the current allowlist
 *
 * Both run the resolver behind `catch_unwind` so a fault inside it turns
 * into a 500 JSON body instead of a dropped connection.
 */

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use futures_util::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::backend::origins::OriginResolver;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct OriginsResponse {
    pub success: bool,
    pub origins: Vec<String>,
    pub count: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct AdminErrorResponse {
    pub success: bool,
    pub error: String,
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AdminErrorResponse {
            success: false,
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Force the origin cache to repopulate
pub async fn refresh_cors(
    State(origins): State<Arc<OriginResolver>>,
) -> axum::response::Response {
    match AssertUnwindSafe(origins.refresh()).catch_unwind().await {
        Ok(entries) => {
            tracing::info!(count = entries.len(), "CORS origins refreshed via admin endpoint");
            Json(RefreshResponse {
                success: true,
                message: format!("CORS origins refreshed ({} origins)", entries.len()),
                timestamp: origins.now().to_rfc3339(),
            })
            .into_response()
        }
        Err(_) => {
            tracing::error!("CORS refresh panicked");
            internal_error("Failed to refresh CORS origins")
        }
    }
}

/// Return the allowlist, repopulating it first if it has expired
pub async fn list_cors_origins(
    State(origins): State<Arc<OriginResolver>>,
) -> axum::response::Response {
    match AssertUnwindSafe(origins.get_allowed_origins()).catch_unwind().await {
        Ok(entries) => Json(OriginsResponse {
            success: true,
            count: entries.len(),
            origins: entries,
            timestamp: origins.now().to_rfc3339(),
        })
        .into_response(),
        Err(_) => {
            tracing::error!("Listing CORS origins panicked");
            internal_error("Failed to load CORS origins")
        }
    }
}
