//! Global feed cache storage.

use std::future::Future;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use metrics::counter;
use tracing::debug;

use crate::application::pagination::FeedPage;
use crate::domain::entities::PostRecord;

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

#[derive(Clone)]
struct CachedPage {
    page: FeedPage<PostRecord>,
    stored_at: Instant,
}

/// Single-slot, time-bounded cache for the global feed's first page.
///
/// A hit within the TTL window returns the stored page without touching the
/// post store, so a post created or deleted after the slot was populated
/// stays invisible until the TTL elapses or [`GlobalFeedCache::invalidate`]
/// runs. Concurrent misses may recompute in parallel; the slot is only ever
/// replaced whole, so no caller observes a partially written page.
pub struct GlobalFeedCache {
    slot: RwLock<Option<CachedPage>>,
    ttl: Duration,
    enabled: bool,
}

impl GlobalFeedCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl: config.ttl(),
            enabled: config.enable_global_feed_cache,
        }
    }

    /// An always-enabled cache with an explicit TTL. Handy where the TTL
    /// does not come from the settings table.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            enabled: true,
        }
    }

    fn fresh(&self) -> Option<FeedPage<PostRecord>> {
        let guard = rw_read(&self.slot, SOURCE, "get");
        guard
            .as_ref()
            .filter(|cached| cached.stored_at.elapsed() < self.ttl)
            .map(|cached| cached.page.clone())
    }

    /// Return the cached page if it is still within its TTL window,
    /// otherwise run `compute`, store its result, and return it.
    ///
    /// `compute` runs outside the slot lock. Two concurrent misses may both
    /// compute; the later store wins and both callers return a complete
    /// page. A failed compute leaves the slot untouched.
    pub async fn get_or_compute<F, Fut, E>(&self, compute: F) -> Result<FeedPage<PostRecord>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FeedPage<PostRecord>, E>>,
    {
        if !self.enabled {
            return compute().await;
        }

        if let Some(page) = self.fresh() {
            counter!("brezza_feed_cache_hit_total").increment(1);
            return Ok(page);
        }
        counter!("brezza_feed_cache_miss_total").increment(1);

        let page = compute().await?;
        {
            let mut guard = rw_write(&self.slot, SOURCE, "store");
            *guard = Some(CachedPage {
                page: page.clone(),
                stored_at: Instant::now(),
            });
        }
        counter!("brezza_feed_cache_store_total").increment(1);
        Ok(page)
    }

    /// Clear the slot immediately, independent of the TTL. This is the only
    /// way to force freshness before expiry; post writes do not call it.
    pub fn invalidate(&self) {
        let mut guard = rw_write(&self.slot, SOURCE, "invalidate");
        if guard.take().is_some() {
            counter!("brezza_feed_cache_invalidate_total").increment(1);
            debug!("global feed cache slot cleared");
        }
    }

    /// Whether the slot currently holds a page within its TTL window.
    pub fn is_warm(&self) -> bool {
        self.fresh().is_some()
    }
}
