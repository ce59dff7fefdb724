/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the authenticated user without sensitive data.
 * The route sits behind `auth_middleware`, which has already verified the
 * bearer token.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the request was not authenticated
/// * `404 Not Found` - If the user no longer exists
/// * `503 Service Unavailable` - If database is not configured
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = state.pool()?;

    let user = get_user_by_id(pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", auth.user_id);
            BackendError::not_found("User")
        })?;

    Ok(Json(user.into()))
}
