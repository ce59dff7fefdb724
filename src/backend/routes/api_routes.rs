/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/chatboxes/{id}/leads` - Lead capture from the widget
 *
 * ## Authenticated (Bearer JWT)
 * - `GET /api/auth/me` - Current user
 * - `GET /api/usage` - Token usage
 * - `POST /api/usage/tokens` - Record token consumption
 * - `POST /api/chatboxes`, `GET /api/chatboxes` - Create, list
 * - `GET|PATCH|DELETE /api/chatboxes/{id}` - Read, update, delete
 * - `GET /api/chatboxes/{id}/leads` - Leads of an owned chatbox
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::chatbox::handlers::{
    create_chatbox, delete_chatbox, get_chatbox, list_chatboxes, update_chatbox,
};
use crate::backend::leads::handlers::{list_leads, submit_lead};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::usage::{get_usage_stats, record_token_usage};

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to `auth_middleware`
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/chatboxes/{id}/leads", post(submit_lead));

    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/usage", get(get_usage_stats))
        .route("/api/usage/tokens", post(record_token_usage))
        .route("/api/chatboxes", post(create_chatbox).get(list_chatboxes))
        .route(
            "/api/chatboxes/{id}",
            get(get_chatbox).patch(update_chatbox).delete(delete_chatbox),
        )
        .route("/api/chatboxes/{id}/leads", get(list_leads))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router.merge(public).merge(protected)
}
