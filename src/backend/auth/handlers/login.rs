/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username, or by email if the identifier contains `@`
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * Unknown users and wrong passwords both return 401 with the same body.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{get_user_by_email, get_user_by_username};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = state.pool()?;
    tracing::info!("Login request for: {}", request.username);

    let user = if request.username.contains('@') {
        get_user_by_email(pool, &request.username).await?
    } else {
        get_user_by_username(pool, &request.username).await?
    };

    let Some(user) = user else {
        tracing::warn!("User not found: {}", request.username);
        return Err(BackendError::unauthorized());
    };

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized());
    }

    let token = create_token(&state.config.jwt_secret, user.id, user.email.clone())?;

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
