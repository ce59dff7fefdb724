/**
 * Token Usage API
 *
 * - `GET /api/usage` - plan, consumption and remaining allowance
 * - `POST /api/usage/tokens` - record consumed tokens against the plan limit
 *
 * Both routes require authentication.
 */

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{add_tokens_used, get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Usage summary returned to the owner dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub plan: String,
    pub tokens_used: i64,
    pub token_limit: i64,
    pub tokens_remaining: i64,
    pub limit_exceeded: bool,
}

impl UsageStats {
    pub fn new(plan: impl Into<String>, tokens_used: i64, token_limit: i64) -> Self {
        Self {
            plan: plan.into(),
            tokens_used,
            token_limit,
            tokens_remaining: (token_limit - tokens_used).max(0),
            limit_exceeded: tokens_used >= token_limit,
        }
    }
}

impl From<&User> for UsageStats {
    fn from(user: &User) -> Self {
        Self::new(user.plan.clone(), user.tokens_used, user.token_limit)
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordTokensRequest {
    pub tokens: i64,
}

/// Decide whether `requested` more tokens fit in the allowance
pub fn check_quota(tokens_used: i64, token_limit: i64, requested: i64) -> Result<(), BackendError> {
    if requested <= 0 {
        return Err(BackendError::bad_request("tokens must be a positive number"));
    }

    match tokens_used.checked_add(requested) {
        Some(total) if total <= token_limit => Ok(()),
        _ => Err(BackendError::handler(
            StatusCode::TOO_MANY_REQUESTS,
            "Token limit exceeded for current plan",
        )),
    }
}

/// Get usage statistics for the authenticated user
pub async fn get_usage_stats(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UsageStats>, BackendError> {
    let pool = state.pool()?;

    let user = get_user_by_id(pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User"))?;

    Ok(Json(UsageStats::from(&user)))
}

/// Record token consumption
///
/// # Errors
///
/// * `400 Bad Request` - zero or negative amount
/// * `429 Too Many Requests` - the amount would exceed the plan limit; nothing is recorded
pub async fn record_token_usage(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<RecordTokensRequest>,
) -> Result<Json<UsageStats>, BackendError> {
    let pool = state.pool()?;

    let user = get_user_by_id(pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User"))?;

    check_quota(user.tokens_used, user.token_limit, request.tokens)?;

    // A concurrent recording can still win the race; the guarded UPDATE
    // returns no row in that case.
    let updated = add_tokens_used(pool, user.id, request.tokens)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token limit reached for user {}", user.id);
            BackendError::handler(
                StatusCode::TOO_MANY_REQUESTS,
                "Token limit exceeded for current plan",
            )
        })?;

    tracing::debug!(
        user_id = %updated.id,
        tokens = request.tokens,
        tokens_used = updated.tokens_used,
        "Recorded token usage"
    );

    Ok(Json(UsageStats::from(&updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_usage_stats_remaining() {
        let stats = UsageStats::new("free", 2_500, 10_000);
        assert_eq!(
            stats,
            UsageStats {
                plan: "free".to_string(),
                tokens_used: 2_500,
                token_limit: 10_000,
                tokens_remaining: 7_500,
                limit_exceeded: false,
            }
        );
    }

    #[test]
    fn test_usage_stats_at_limit() {
        let stats = UsageStats::new("starter", 100_000, 100_000);
        assert_eq!(stats.tokens_remaining, 0);
        assert!(stats.limit_exceeded);
    }

    #[test]
    fn test_check_quota_within_limit() {
        assert!(check_quota(9_000, 10_000, 1_000).is_ok());
    }

    #[test]
    fn test_check_quota_exceeded() {
        let err = check_quota(9_000, 10_000, 1_001).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_check_quota_rejects_non_positive() {
        assert_eq!(
            check_quota(0, 10_000, 0).unwrap_err().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            check_quota(0, 10_000, -5).unwrap_err().status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_check_quota_overflow_is_exceeded() {
        let err = check_quota(i64::MAX - 1, i64::MAX, i64::MAX).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }
}
