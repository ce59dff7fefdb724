/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the user ID to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::sessions::{verify_token, Claims};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Pull the bearer token out of the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized()
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized()
    })
}

/// Verify a token and turn its claims into an `AuthenticatedUser`
pub fn authenticate(secret: &str, token: &str) -> Result<AuthenticatedUser, BackendError> {
    let Claims { sub, email, .. } = verify_token(secret, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized()
    })?;

    let user_id = Uuid::parse_str(&sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthorized()
    })?;

    Ok(AuthenticatedUser { user_id, email })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts JWT token from Authorization header
/// 2. Verifies the token
/// 3. Confirms the user still exists when a database is configured
/// 4. Attaches user data to request extensions for use in handlers
///
/// Returns 401 Unauthorized if token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;
    let user = authenticate(&app_state.config.jwt_secret, token)?;

    if let Some(pool) = &app_state.db_pool {
        if !user_exists(pool, user.user_id).await? {
            tracing::warn!("User not found in database: {}", user.user_id);
            return Err(BackendError::unauthorized());
        }
    }

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    use crate::backend::auth::users::get_user_by_id;

    Ok(get_user_by_id(pool, user_id).await?.is_some())
}

/// Axum extractor for authenticated user
///
/// Reads the `AuthenticatedUser` that `auth_middleware` put into the request
/// extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized()
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::create_token;
    use axum::http::{HeaderValue, StatusCode};

    const SECRET: &str = "test-secret";

    #[test]
    fn test_bearer_token_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_missing() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_authenticate_valid_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(SECRET, user_id, "owner@example.com".to_string()).unwrap();

        let user = authenticate(SECRET, &token).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email, "owner@example.com");
    }

    #[test]
    fn test_authenticate_rejects_garbage() {
        let err = authenticate(SECRET, "not-a-jwt").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
