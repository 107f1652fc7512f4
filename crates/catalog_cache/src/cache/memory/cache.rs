//! In-memory cache implementation with LRU eviction.
//!
//! Entries are keyed by `(region, key)`. Every region keeps the set of keys
//! it owns so that clearing a region touches only its own entries:
//! - `set` records the key under its region
//! - LRU evictions and expired reads drop the key from its region
//! - `clear_region` removes the region's keys and its tracking set together

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use catalog_cache_core::cache::{Cache, Result};

type EntryKey = (String, String);

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

#[derive(Debug)]
struct Inner {
    store: LruCache<EntryKey, CacheEntry>,
    /// region -> keys stored in that region.
    regions: HashMap<String, HashSet<String>>,
}

impl Inner {
    fn untrack(&mut self, region: &str, key: &str) {
        if let Some(keys) = self.regions.get_mut(region) {
            keys.remove(key);
            if keys.is_empty() {
                self.regions.remove(region);
            }
        }
    }
}

/// In-memory cache with LRU eviction and lazy TTL expiration.
///
/// The store and the region tracking live behind one lock, so a
/// `clear_region` is atomic with respect to concurrent `get` and `set`.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` entries.
    ///
    /// A `max_entries` of 0 is treated as 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                store: LruCache::new(capacity),
                regions: HashMap::new(),
            })),
        }
    }

    /// Number of live entries across all regions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.store.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, region: &str, key: &str) -> Result<Option<Vec<u8>>> {
        // LRU reads update recency, so they need the write lock.
        let mut inner = self.inner.write().await;
        let entry_key = (region.to_string(), key.to_string());

        let expired = match inner.store.get(&entry_key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.store.pop(&entry_key);
            inner.untrack(region, key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        region: &str,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        let entry = CacheEntry::new(value.to_vec(), ttl);

        let displaced = inner
            .store
            .push((region.to_string(), key.to_string()), entry);

        if let Some(((evicted_region, evicted_key), _)) = displaced {
            // `push` also returns the old value when the key was replaced.
            if evicted_region != region || evicted_key != key {
                tracing::trace!(region = %evicted_region, key = %evicted_key, "Evicted cache entry");
                inner.untrack(&evicted_region, &evicted_key);
            }
        }

        inner
            .regions
            .entry(region.to_string())
            .or_default()
            .insert(key.to_string());

        Ok(())
    }

    async fn clear_region(&self, region: &str) -> Result<()> {
        let mut inner = self.inner.write().await;

        let Some(keys) = inner.regions.remove(region) else {
            return Ok(());
        };

        for key in &keys {
            inner.store.pop(&(region.to_string(), key.clone()));
        }

        tracing::debug!(region, removed = keys.len(), "Cleared cache region");
        Ok(())
    }
}
