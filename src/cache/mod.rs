//! Global feed cache.
//!
//! Exactly one slot, scoped to (global feed, page 1) — the heaviest and most
//! frequently requested view. A hit within the TTL window is served without
//! touching the post store; staleness up to the TTL is accepted behavior,
//! bounded by [`GlobalFeedCache::invalidate`].
//!
//! Configured via the `[cache]` settings table:
//!
//! ```toml
//! [cache]
//! enable_global_feed_cache = true
//! global_feed_cache_ttl_seconds = 20
//! ```

mod config;
pub(crate) mod lock;
mod store;

pub use config::{CacheConfig, DEFAULT_GLOBAL_FEED_TTL_SECS};
pub use store::GlobalFeedCache;
