/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email format and password length
 * 2. Check if username or email already exists
 * 3. Hash password using bcrypt
 * 4. Create user in database on the free plan
 * 5. Generate JWT token
 * 6. Return token and user info
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 * - JWT tokens are generated with 30-day expiration
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check the request fields before touching the database
pub fn validate_signup(request: &SignupRequest) -> Result<(), BackendError> {
    if !is_valid_username(&request.username) {
        tracing::warn!("Invalid username format: {}", request.username);
        return Err(BackendError::bad_request(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if request.password.len() < 8 {
        tracing::warn!("Password too short");
        return Err(BackendError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    Ok(())
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If username, email or password is invalid
/// * `409 Conflict` - If the username or email is already registered
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If hashing, user creation, or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = state.pool()?;
    tracing::info!(
        "Signup request for username: {}, email: {}",
        request.username,
        request.email
    );

    validate_signup(&request)?;

    if get_user_by_username(pool, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::conflict("Username already taken"));
    }

    if get_user_by_email(pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(pool, request.username, request.email, password_hash)
        .await
        .map_err(insert_conflict)?;

    let token = create_token(&state.config.jwt_secret, user.id, user.email.clone())?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// A concurrent signup can win the race between the checks above and the
/// insert; its unique violation is the same 409.
fn insert_conflict(error: sqlx::Error) -> BackendError {
    let conflict = error
        .as_database_error()
        .filter(|db_error| db_error.is_unique_violation())
        .map(|db_error| match db_error.constraint() {
            Some(constraint) if constraint.contains("email") => "Email already registered",
            _ => "Username already taken",
        });

    match conflict {
        Some(message) => {
            tracing::warn!("Signup lost a uniqueness race: {}", message);
            BackendError::conflict(message)
        }
        None => error.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn request(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("a_b_c_123"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("1alice"));
        assert!(!is_valid_username("alice-smith"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }

    #[test]
    fn test_validate_signup_ok() {
        assert!(validate_signup(&request("alice", "alice@example.com", "password123")).is_ok());
    }

    #[test]
    fn test_validate_signup_invalid_email() {
        let err = validate_signup(&request("alice", "invalid-email", "password123")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[derive(Debug)]
    struct UniqueViolation(&'static str);

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint \"{}\"", self.0)
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.0)
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_on_email_is_conflict() {
        let error = sqlx::Error::Database(Box::new(UniqueViolation("users_email_key")));
        let mapped = insert_conflict(error);
        assert_eq!(mapped.status_code(), StatusCode::CONFLICT);
        assert_eq!(mapped.message(), "Email already registered");
    }

    #[test]
    fn test_unique_violation_on_username_is_conflict() {
        let error = sqlx::Error::Database(Box::new(UniqueViolation("users_username_key")));
        let mapped = insert_conflict(error);
        assert_eq!(mapped.status_code(), StatusCode::CONFLICT);
        assert_eq!(mapped.message(), "Username already taken");
    }

    #[test]
    fn test_other_insert_errors_stay_internal() {
        let mapped = insert_conflict(sqlx::Error::PoolTimedOut);
        assert_eq!(mapped.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validate_signup_short_password() {
        let err = validate_signup(&request("alice", "alice@example.com", "short")).unwrap_err();
        assert_eq!(err.message(), "Password must be at least 8 characters");
    }
}
