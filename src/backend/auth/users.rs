/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::Plan;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: uuid::Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Plan name (`free`, `starter`, `pro`)
    pub plan: String,
    /// Token allowance for the current plan
    pub token_limit: i64,
    /// Tokens consumed so far
    pub tokens_used: i64,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, plan, token_limit, tokens_used, created_at, updated_at";

/// Create a new user on the free plan
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    username: String,
    email: String,
    password_hash: String,
) -> Result<User, sqlx::Error> {
    let id = uuid::Uuid::new_v4();
    let now = Utc::now();
    let plan = Plan::Free;

    let sql = format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, plan, token_limit, tokens_used, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8)
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .bind(plan.as_str())
        .bind(plan.token_limit())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &PgPool, id: uuid::Uuid) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Add `tokens` to the user's consumption if it stays within the limit
///
/// The check and the increment happen in one statement, so concurrent
/// recordings cannot push a user past their limit.
///
/// # Returns
/// The updated user, or `None` if the user does not exist or the limit
/// would be exceeded
pub async fn add_tokens_used(
    pool: &PgPool,
    user_id: uuid::Uuid,
    tokens: i64,
) -> Result<Option<User>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE users
        SET tokens_used = tokens_used + $1, updated_at = $2
        WHERE id = $3 AND tokens_used + $1 <= token_limit
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(tokens)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
