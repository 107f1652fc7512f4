//! Get-or-compute adapter over a [`Cache`] store.
//!
//! [`CacheManager`] turns the byte store into a typed read-through cache:
//!
//! - a hit returns the stored value without running the computation
//! - a miss runs the computation once per (region, key), even under
//!   concurrent callers, and stores its result
//! - a failed computation stores nothing
//! - a value computed while its region was being cleared is returned but
//!   not stored

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::serialization::{deserialize_value, serialize_value};
use super::{Cache, CacheError, Result};

type FlightKey = (String, String);
type FlightMap = HashMap<FlightKey, Arc<Mutex<()>>>;

/// Point-in-time counters for a [`CacheManager`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    /// Computed values dropped because their region was cleared meanwhile.
    pub discarded: u64,
    pub region_clears: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
    discarded: AtomicU64,
    region_clears: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            region_clears: self.region_clears.load(Ordering::Relaxed),
        }
    }
}

/// Holds the per-key computation lock and releases its map slot on drop.
struct Flight<'a> {
    in_flight: &'a StdMutex<FlightMap>,
    key: FlightKey,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut map = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // The map and this flight hold the only references: nobody is waiting.
        let idle = map
            .get(&self.key)
            .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock))
            && Arc::strong_count(&self.lock) == 2;
        if idle {
            map.remove(&self.key);
        }
    }
}

/// Typed read-through cache over a byte [`Cache`] store.
pub struct CacheManager<C: Cache + ?Sized> {
    cache: Arc<C>,
    ttl: Option<Duration>,
    in_flight: StdMutex<FlightMap>,
    generations: RwLock<HashMap<String, u64>>,
    counters: Counters,
}

impl<C: Cache + ?Sized> CacheManager<C> {
    /// Creates a manager storing entries in `cache` with an optional TTL.
    pub fn new(cache: Arc<C>, ttl: Option<Duration>) -> Self {
        Self {
            cache,
            ttl,
            in_flight: StdMutex::new(HashMap::new()),
            generations: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Returns the cached value for `key` in `region`, computing and storing it on a miss.
    ///
    /// Errors from `compute` are returned unchanged and nothing is stored.
    /// Store failures and encoding failures are returned as `E::from(CacheError)`;
    /// `compute` is never run after a failed store read.
    pub async fn get_or_compute<V, E, F, Fut>(
        &self,
        region: &str,
        key: &str,
        compute: F,
    ) -> std::result::Result<V, E>
    where
        V: Serialize + DeserializeOwned + Send,
        E: From<CacheError>,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<V, E>> + Send,
    {
        if let Some(value) = self.lookup(region, key).await? {
            return Ok(value);
        }

        let _flight = self.enter_flight(region, key).await;

        // Another caller may have filled the entry while we waited.
        if let Some(value) = self.lookup(region, key).await? {
            return Ok(value);
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(region, key, "Cache miss");

        let generation = self.generation(region).await;
        let value = compute().await?;
        let bytes = serialize_value(&value)?;

        let generations = self.generations.read().await;
        if generations.get(region).copied().unwrap_or_default() == generation {
            self.cache.set(region, key, &bytes, self.ttl).await?;
            self.counters.stores.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(region, key, "Region cleared during compute, not storing");
        }
        drop(generations);

        Ok(value)
    }

    /// Removes every entry of `region`.
    ///
    /// Computations that started before the clear will not store their values.
    pub async fn clear_region(&self, region: &str) -> Result<()> {
        let mut generations = self.generations.write().await;
        *generations.entry(region.to_string()).or_default() += 1;
        self.cache.clear_region(region).await?;
        self.counters.region_clears.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Returns a snapshot of the hit, miss and store counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    async fn lookup<V: DeserializeOwned>(&self, region: &str, key: &str) -> Result<Option<V>> {
        match self.cache.get(region, key).await? {
            Some(bytes) => {
                let value = deserialize_value(&bytes)?;
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(region, key, "Cache hit");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn generation(&self, region: &str) -> u64 {
        self.generations
            .read()
            .await
            .get(region)
            .copied()
            .unwrap_or_default()
    }

    async fn enter_flight(&self, region: &str, key: &str) -> Flight<'_> {
        let flight_key = (region.to_string(), key.to_string());
        let lock = {
            let mut map = self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            map.entry(flight_key.clone()).or_default().clone()
        };

        let mut flight = Flight {
            in_flight: &self.in_flight,
            key: flight_key,
            lock,
            guard: None,
        };
        flight.guard = Some(flight.lock.clone().lock_owned().await);
        flight
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    const REGION: &str = "test-region";

    #[derive(Debug, PartialEq)]
    enum TestError {
        Upstream(String),
        Cache(CacheError),
    }

    impl From<CacheError> for TestError {
        fn from(err: CacheError) -> Self {
            TestError::Cache(err)
        }
    }

    #[derive(Default)]
    struct MockCache {
        entries: RwLock<HashMap<(String, String), Vec<u8>>>,
        fail_get: AtomicBool,
        set_calls: AtomicUsize,
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, region: &str, key: &str) -> Result<Option<Vec<u8>>> {
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(CacheError::ConnectionFailed("store offline".to_string()));
            }
            Ok(self
                .entries
                .read()
                .await
                .get(&(region.to_string(), key.to_string()))
                .cloned())
        }

        async fn set(
            &self,
            region: &str,
            key: &str,
            value: &[u8],
            _ttl: Option<Duration>,
        ) -> Result<()> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            self.entries
                .write()
                .await
                .insert((region.to_string(), key.to_string()), value.to_vec());
            Ok(())
        }

        async fn clear_region(&self, region: &str) -> Result<()> {
            self.entries.write().await.retain(|(r, _), _| r != region);
            Ok(())
        }
    }

    fn manager() -> (Arc<MockCache>, CacheManager<MockCache>) {
        let cache = Arc::new(MockCache::default());
        let manager = CacheManager::new(cache.clone(), None);
        (cache, manager)
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let (_cache, manager) = manager();
        let calls = &AtomicUsize::new(0);

        for _ in 0..3 {
            let value: std::result::Result<String, TestError> = manager
                .get_or_compute(REGION, "k", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("v".to_string())
                })
                .await;
            assert_eq!(value, Ok("v".to_string()));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = manager.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.stores, 1);
        assert_eq!(manager.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_stored() {
        let (cache, manager) = manager();

        let result: std::result::Result<String, TestError> = manager
            .get_or_compute(REGION, "k", || async {
                Err(TestError::Upstream("boom".to_string()))
            })
            .await;
        assert_eq!(result, Err(TestError::Upstream("boom".to_string())));
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);

        let retried: std::result::Result<String, TestError> = manager
            .get_or_compute(REGION, "k", || async { Ok("ok".to_string()) })
            .await;
        assert_eq!(retried, Ok("ok".to_string()));
    }

    #[tokio::test]
    async fn test_store_failure_skips_compute() {
        let (cache, manager) = manager();
        cache.fail_get.store(true, Ordering::SeqCst);
        let calls = &AtomicUsize::new(0);

        let result: std::result::Result<String, TestError> = manager
            .get_or_compute(REGION, "k", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("v".to_string())
            })
            .await;

        assert!(matches!(
            result,
            Err(TestError::Cache(CacheError::ConnectionFailed(_)))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_an_error() {
        let (cache, manager) = manager();
        cache
            .set(REGION, "k", b"not json", None)
            .await
            .expect("set should succeed");

        let result: std::result::Result<Vec<u32>, TestError> = manager
            .get_or_compute(REGION, "k", || async { Ok(vec![1]) })
            .await;

        assert!(matches!(
            result,
            Err(TestError::Cache(CacheError::Serialization(_)))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_misses_compute_once() {
        let (_cache, manager) = manager();
        let calls = &AtomicUsize::new(0);

        let compute = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, TestError>(42u32)
        };

        let (a, b, c) = tokio::join!(
            manager.get_or_compute(REGION, "k", compute),
            manager.get_or_compute(REGION, "k", compute),
            manager.get_or_compute(REGION, "k", compute),
        );

        assert_eq!((a, b, c), (Ok(42), Ok(42), Ok(42)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(manager.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_clear_during_compute_is_not_stored() {
        let (cache, manager) = manager();
        let started = &Notify::new();
        let release = &Notify::new();

        let read = manager.get_or_compute(REGION, "k", move || async move {
            started.notify_one();
            release.notified().await;
            Ok::<_, TestError>("stale".to_string())
        });
        let clear = async {
            started.notified().await;
            manager.clear_region(REGION).await.expect("clear should succeed");
            release.notify_one();
        };

        let (value, ()) = tokio::join!(read, clear);

        assert_eq!(value, Ok("stale".to_string()));
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);
        assert_eq!(manager.stats().discarded, 1);

        let fresh: std::result::Result<String, TestError> = manager
            .get_or_compute(REGION, "k", || async { Ok("fresh".to_string()) })
            .await;
        assert_eq!(fresh, Ok("fresh".to_string()));
    }

    #[tokio::test]
    async fn test_clear_region_leaves_other_regions() {
        let (_cache, manager) = manager();

        let _: std::result::Result<u32, TestError> =
            manager.get_or_compute(REGION, "k", || async { Ok(1) }).await;
        let _: std::result::Result<u32, TestError> =
            manager.get_or_compute("other", "k", || async { Ok(2) }).await;

        manager.clear_region(REGION).await.unwrap();

        let calls = &AtomicUsize::new(0);
        let other: std::result::Result<u32, TestError> = manager
            .get_or_compute("other", "k", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(0)
            })
            .await;
        let cleared: std::result::Result<u32, TestError> = manager
            .get_or_compute(REGION, "k", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(3)
            })
            .await;

        assert_eq!(other, Ok(2));
        assert_eq!(cleared, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(manager.stats().region_clears, 1);
    }
}
