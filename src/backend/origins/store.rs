/**
 * Tenant Domain Source
 *
 * The origin resolver only ever needs one read from tenant data: the declared
 * `domain_url` of each chatbox together with its status. This module defines
 * that contract as a trait and provides the Postgres implementation over the
 * `chatboxes` table.
 *
 * # Contract
 *
 * Implementations return raw stored records. Deciding which records
 * contribute (active, non-blank), trimming, scheme defaulting and
 * deduplication are the resolver's job.
 */

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use thiserror::Error;

use crate::shared::ChatboxStatus;

/// Errors raised while reading tenant domains
#[derive(Debug, Error)]
pub enum StoreError {
    /// No database is configured for this process
    #[error("tenant store is not configured")]
    Unavailable,

    /// The query itself failed
    #[error("tenant store query failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only view of one `chatboxes` row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TenantDomainRecord {
    pub domain_url: Option<String>,
    pub status: String,
}

impl TenantDomainRecord {
    pub fn new(domain_url: Option<&str>, status: ChatboxStatus) -> Self {
        Self {
            domain_url: domain_url.map(str::to_string),
            status: status.as_str().to_string(),
        }
    }

    /// Unknown status text counts as inactive.
    pub fn is_active(&self) -> bool {
        matches!(self.status.parse(), Ok(ChatboxStatus::Active))
    }

    /// The trimmed domain, if this record belongs in the allowlist
    pub fn contributing_domain(&self) -> Option<&str> {
        if !self.is_active() {
            return None;
        }
        self.domain_url
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }
}

/// Read-only view over tenant domain declarations
#[async_trait]
pub trait TenantDomainSource: Send + Sync {
    /// Every tenant record that declares a domain, whatever its status
    async fn tenant_domains(&self) -> Result<Vec<TenantDomainRecord>, StoreError>;
}

/// `TenantDomainSource` backed by the `chatboxes` table
///
/// Holds an optional pool so the server can start without a database; in
/// that case every lookup reports `StoreError::Unavailable` and the resolver
/// serves the static allowlist only.
#[derive(Clone)]
pub struct ChatboxDomainStore {
    pool: Option<PgPool>,
}

impl ChatboxDomainStore {
    pub fn new(pool: Option<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantDomainSource for ChatboxDomainStore {
    async fn tenant_domains(&self) -> Result<Vec<TenantDomainRecord>, StoreError> {
        let pool = self.pool.as_ref().ok_or(StoreError::Unavailable)?;

        let records = sqlx::query_as::<_, TenantDomainRecord>(
            r#"
            SELECT domain_url, status
            FROM chatboxes
            WHERE domain_url IS NOT NULL
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
