/**
 * Origin Resolver
 *
 * Decides which web origins may make credentialed cross-origin requests.
 *
 * # Strategy
 *
 * 1. A static check against hard-coded operational origins and the primary
 *    domain. No I/O.
 * 2. A dynamic check against domains declared by active chatboxes. The
 *    allowlist is cached for a fixed TTL and repopulated on the first read
 *    after expiry.
 *
 * # Concurrency
 *
 * The cached snapshot is an `Arc` swapped wholesale under a `RwLock`, so a
 * reader never sees a half-built list. Repopulation is serialized by a
 * separate mutex and the cache is re-checked once it is held, so a burst of
 * requests arriving just after expiry costs one store query.
 *
 * # Degradation
 *
 * Store failures never fail a request. A TTL-driven repopulation that cannot
 * reach the store serves the static list only; a forced `refresh()` that
 * cannot reach it keeps the dynamic entries it already knew about.
 */

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::backend::origins::allowlist::StaticOrigins;
use crate::backend::origins::clock::{Clock, SystemClock};
use crate::backend::origins::normalize::{dedupe, is_url_like, origin_matches_entry, to_allowlist_entry};
use crate::backend::origins::store::{TenantDomainRecord, TenantDomainSource};

/// Default lifetime of a populated allowlist
pub const DEFAULT_CACHE_TTL: Duration = Duration::minutes(5);

/// One complete population of the allowlist
#[derive(Debug, Default)]
struct OriginSnapshot {
    /// Static entries followed by dynamic ones, deduplicated
    entries: Vec<String>,
    /// The tenant-derived part of `entries`
    dynamic: Vec<String>,
    /// `None` until the first population and after invalidation
    refreshed_at: Option<DateTime<Utc>>,
}

/// How a failed store lookup should be treated during repopulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnStoreFailure {
    DropDynamic,
    KeepPrevious,
}

/// Process-wide origin allowlist with a time-windowed cache
pub struct OriginResolver {
    statics: StaticOrigins,
    store: Arc<dyn TenantDomainSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    cache: RwLock<Arc<OriginSnapshot>>,
    repopulate_lock: Mutex<()>,
}

impl OriginResolver {
    pub fn new(statics: StaticOrigins, store: Arc<dyn TenantDomainSource>) -> Self {
        Self::with_clock(statics, store, Arc::new(SystemClock), DEFAULT_CACHE_TTL)
    }

    pub fn with_clock(
        statics: StaticOrigins,
        store: Arc<dyn TenantDomainSource>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            statics,
            store,
            clock,
            ttl,
            cache: RwLock::new(Arc::new(OriginSnapshot::default())),
            repopulate_lock: Mutex::new(()),
        }
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// When the cache was last populated, if it currently is
    pub async fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.cache.read().await.refreshed_at
    }

    /// Decide whether `origin` may receive credentialed CORS headers.
    ///
    /// Callers handle an absent `Origin` header themselves; an empty string
    /// passed here matches nothing.
    pub async fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.statics.allows(origin) {
            return true;
        }

        let allowed = self.get_allowed_origins().await;
        let matched = allowed
            .iter()
            .filter(|entry| is_url_like(entry))
            .any(|entry| origin_matches_entry(origin, entry));

        if matched {
            tracing::debug!(origin, "Origin allowed by tenant domain");
        }
        matched
    }

    /// The full allowlist, repopulating it first if the cache has expired.
    pub async fn get_allowed_origins(&self) -> Vec<String> {
        if let Some(entries) = self.fresh_entries().await {
            return entries;
        }

        let _guard = self.repopulate_lock.lock().await;
        // Another task may have repopulated while we waited.
        if let Some(entries) = self.fresh_entries().await {
            return entries;
        }
        self.repopulate(OnStoreFailure::DropDynamic).await
    }

    /// Invalidate the cache and repopulate it immediately.
    pub async fn refresh(&self) -> Vec<String> {
        let _guard = self.repopulate_lock.lock().await;
        self.invalidate().await;
        tracing::info!("CORS origin cache invalidated, repopulating");
        self.repopulate(OnStoreFailure::KeepPrevious).await
    }

    async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        let previous = Arc::clone(&cache);
        *cache = Arc::new(OriginSnapshot {
            entries: previous.entries.clone(),
            dynamic: previous.dynamic.clone(),
            refreshed_at: None,
        });
    }

    async fn fresh_entries(&self) -> Option<Vec<String>> {
        let snapshot = Arc::clone(&*self.cache.read().await);
        let refreshed_at = snapshot.refreshed_at?;
        let elapsed = self.clock.now() - refreshed_at;
        // A clock that stepped backwards says nothing about freshness.
        if snapshot.entries.is_empty() || elapsed < Duration::zero() || elapsed >= self.ttl {
            return None;
        }
        tracing::debug!(count = snapshot.entries.len(), "CORS origin cache hit");
        Some(snapshot.entries.clone())
    }

    /// Must be called with `repopulate_lock` held.
    async fn repopulate(&self, on_failure: OnStoreFailure) -> Vec<String> {
        let statics = self.statics.list().to_vec();

        let dynamic = match self.store.tenant_domains().await {
            Ok(records) => dedupe(
                records
                    .iter()
                    .filter_map(TenantDomainRecord::contributing_domain)
                    .filter_map(to_allowlist_entry),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load tenant domains, serving static CORS origins");
                match on_failure {
                    OnStoreFailure::DropDynamic => Vec::new(),
                    OnStoreFailure::KeepPrevious => self.cache.read().await.dynamic.clone(),
                }
            }
        };

        let entries = dedupe(statics.into_iter().chain(dynamic.iter().cloned()));
        let snapshot = OriginSnapshot {
            entries: entries.clone(),
            dynamic,
            refreshed_at: Some(self.clock.now()),
        };

        tracing::info!(
            total = snapshot.entries.len(),
            dynamic = snapshot.dynamic.len(),
            "CORS origin cache populated"
        );
        *self.cache.write().await = Arc::new(snapshot);
        entries
    }
}
