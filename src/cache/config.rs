//! Feed cache configuration.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_GLOBAL_FEED_TTL_SECS: u64 = 20;

/// Cache settings, deserialized from the `[cache]` settings table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the global-feed page cache. When off, every request computes
    /// a fresh page.
    pub enable_global_feed_cache: bool,
    /// Seconds a cached global feed page may be served before the next
    /// request recomputes it.
    pub global_feed_cache_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_global_feed_cache: true,
            global_feed_cache_ttl_seconds: DEFAULT_GLOBAL_FEED_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.global_feed_cache_ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert!(config.enable_global_feed_cache);
        assert_eq!(config.global_feed_cache_ttl_seconds, 20);
        assert_eq!(config.ttl(), Duration::from_secs(20));
    }
}
