/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * The signing secret comes from `ServerConfig::jwt_secret`.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of an issued token
pub const TOKEN_LIFETIME: Duration = Duration::days(30);

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn unix_seconds(at: chrono::DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp()).unwrap_or(0)
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `secret` - HMAC signing secret
/// * `user_id` - User ID (UUID)
/// * `email` - User email
///
/// # Returns
/// JWT token string
pub fn create_token(
    secret: &str,
    user_id: uuid::Uuid,
    email: String,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        email,
        exp: unix_seconds(now + TOKEN_LIFETIME),
        iat: unix_seconds(now),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `secret` - HMAC signing secret
/// * `token` - JWT token string
///
/// # Returns
/// Decoded claims or error
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}
