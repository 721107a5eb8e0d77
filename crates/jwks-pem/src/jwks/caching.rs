//! Time-bounded cache of key set documents, keyed by key set URL

use crate::jwks::KeySet;
use crate::limits::MAX_CACHE_TTL;
use moka::future::Cache;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default time to live for cached key sets (24 hours)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(86_400_000);

/// Cache of key set documents keyed by the fully resolved key set URL
///
/// An entry is served while `now - inserted_at < ttl`; afterwards it reads as
/// a miss and is replaced by the next successful fetch. A TTL of zero
/// disables caching entirely. TTLs above 100 years are clamped to 100 years.
///
/// Clones share the same underlying store, so a single cache can be handed to
/// several resolvers.
#[derive(Clone)]
pub struct KeySetCache {
    ttl: Duration,
    store: Option<Cache<String, Arc<KeySet>>>,
}

impl KeySetCache {
    /// Create a cache whose entries expire `ttl` after insertion
    pub fn new(ttl: Duration) -> Self {
        let ttl = ttl.min(MAX_CACHE_TTL);
        let store = (!ttl.is_zero()).then(|| Cache::builder().time_to_live(ttl).build());
        Self { ttl, store }
    }

    /// Create a cache that never serves an entry
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Effective time to live of cached entries
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the cached key set for `url` unless it is missing or stale
    pub async fn get(&self, url: &str) -> Option<Arc<KeySet>> {
        self.store.as_ref()?.get(url).await
    }

    /// Store `set` for `url`, replacing any previous entry and resetting its age
    pub async fn insert(&self, url: &str, set: Arc<KeySet>) {
        if let Some(store) = &self.store {
            store.insert(url.to_string(), set).await;
        }
    }

    /// Drop the entry for `url`, forcing the next lookup to fetch
    pub async fn invalidate(&self, url: &str) {
        if let Some(store) = &self.store {
            store.invalidate(url).await;
        }
    }

    /// Approximate number of live entries
    pub async fn entry_count(&self) -> u64 {
        match &self.store {
            Some(store) => {
                store.run_pending_tasks().await;
                store.entry_count()
            }
            None => 0,
        }
    }
}

impl Default for KeySetCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl fmt::Debug for KeySetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySetCache")
            .field("ttl", &self.ttl)
            .field("enabled", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwks::jwk::Jwk;

    const URL: &str = "https://auth.example.com/auth/realms/test/protocol/openid-connect/certs";

    fn key_set(kid: &str) -> Arc<KeySet> {
        Arc::new(KeySet {
            keys: Some(vec![Jwk {
                kid: Some(kid.into()),
                ..Jwk::default()
            }]),
        })
    }

    #[tokio::test]
    async fn test_get_after_insert() {
        let cache = KeySetCache::new(Duration::from_secs(60));
        assert!(cache.get(URL).await.is_none());

        cache.insert(URL, key_set("kid1")).await;
        let cached = cache.get(URL).await.expect("cached");
        assert!(cached.find("kid1").is_some());
    }

    #[tokio::test]
    async fn test_keyed_by_url() {
        let cache = KeySetCache::new(Duration::from_secs(60));
        cache.insert(URL, key_set("kid1")).await;

        assert!(cache.get("https://other.example.com/certs").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = KeySetCache::new(Duration::from_secs(60));
        cache.insert(URL, key_set("kid1")).await;
        cache.insert(URL, key_set("kid2")).await;

        let cached = cache.get(URL).await.expect("cached");
        assert!(cached.find("kid1").is_none());
        assert!(cached.find("kid2").is_some());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = KeySetCache::new(Duration::from_millis(100));
        cache.insert(URL, key_set("kid1")).await;
        assert!(cache.get(URL).await.is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get(URL).await.is_none());

        // A fresh insert is served again
        cache.insert(URL, key_set("kid2")).await;
        assert!(cache.get(URL).await.is_some());
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = KeySetCache::new(Duration::ZERO);
        cache.insert(URL, key_set("kid1")).await;

        assert!(cache.get(URL).await.is_none());
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = KeySetCache::new(Duration::from_secs(60));
        let shared = cache.clone();
        cache.insert(URL, key_set("kid1")).await;

        assert!(shared.get(URL).await.is_some());
        assert_eq!(shared.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = KeySetCache::new(Duration::from_secs(60));
        cache.insert(URL, key_set("kid1")).await;
        cache.invalidate(URL).await;

        assert!(cache.get(URL).await.is_none());
    }

    #[tokio::test]
    async fn test_huge_ttl_is_clamped() {
        let cache = KeySetCache::new(Duration::from_millis(u64::MAX));
        assert_eq!(cache.ttl(), MAX_CACHE_TTL);

        cache.insert(URL, key_set("kid1")).await;
        assert!(cache.get(URL).await.is_some());

        let cache = KeySetCache::new(Duration::MAX);
        assert_eq!(cache.ttl(), MAX_CACHE_TTL);
    }

    #[test]
    fn test_default_ttl() {
        let cache = KeySetCache::default();
        assert_eq!(cache.ttl(), Duration::from_secs(24 * 60 * 60));
        assert_eq!(KeySetCache::disabled().ttl(), Duration::ZERO);
    }
}
