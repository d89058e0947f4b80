//! Stale-tolerant in-memory cache
//!
//! Each proxy endpoint owns one [`StaleCache`] that remembers the last
//! successful response per cache key plus its fetch timestamp. When a live
//! upstream fetch fails, the endpoint serves the cached value as long as it
//! is younger than the endpoint's fallback window; otherwise the failure
//! surfaces to the caller.
//!
//! There is no eviction. The key space is bounded in practice by the set of
//! query-parameter values actually requested (quote assets, category ids,
//! favorite-id strings), which is small and operator-controlled. That is a
//! known scaling limitation of this design, not something the cache guards
//! against.
//!
//! Concurrent `put` calls for the same key may race; last-write-wins is
//! fine since no read-modify-write dependency exists.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::errors::UpstreamError;
use crate::logger::{self, LogTag};

/// Time source for cache entries, injected so tests can control age
pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds
    fn now_ms(&self) -> i64;
}

/// Wall-clock time source used in production
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// One remembered response value and when it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at_ms: i64,
}

/// Last-good-value cache keyed by request-distinguishing parameters
///
/// Endpoints without parameters use a single constant key (`""`).
pub struct StaleCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> StaleCache<V> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Get the stored entry for a key, regardless of age
    pub fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).cloned()
    }

    /// Store a value for a key, stamping it with the current time
    pub fn put(&self, key: &str, value: V) {
        let entry = CacheEntry {
            value,
            fetched_at_ms: self.clock.now_ms(),
        };
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), entry);
    }

    /// Get the stored value if it is younger than `max_age_ms`
    pub fn get_fresh(&self, key: &str, max_age_ms: i64) -> Option<V> {
        let entry = self.get(key)?;
        let age = self.clock.now_ms() - entry.fetched_at_ms;
        if age < max_age_ms {
            Some(entry.value)
        } else {
            None
        }
    }

    /// Number of distinct keys currently stored
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for StaleCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run an upstream fetch with stale-cache fallback
///
/// On success the result is cached under `key` and returned. On failure the
/// cached value is returned instead if it is still within `max_age_ms`;
/// otherwise the original fetch error surfaces. A stale serve is not
/// distinguishable from a fresh one to the caller.
pub async fn with_stale_fallback<V, F, Fut>(
    cache: &StaleCache<V>,
    key: &str,
    max_age_ms: i64,
    fetch: F,
) -> Result<V, UpstreamError>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, UpstreamError>>,
{
    match fetch().await {
        Ok(value) => {
            cache.put(key, value.clone());
            Ok(value)
        }
        Err(err) => match cache.get_fresh(key, max_age_ms) {
            Some(value) => {
                logger::info(
                    LogTag::Cache,
                    &format!("Upstream failed ({}), serving cached value for key '{}'", err, key),
                );
                Ok(value)
            }
            None => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Manually advanced clock for deterministic age checks
    struct ManualClock {
        now_ms: AtomicI64,
    }

    impl ManualClock {
        fn new(start_ms: i64) -> Arc<Self> {
            Arc::new(Self {
                now_ms: AtomicI64::new(start_ms),
            })
        }

        fn advance(&self, delta_ms: i64) {
            self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.now_ms.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_get_fresh_within_window() {
        let clock = ManualClock::new(1_000);
        let cache: StaleCache<String> = StaleCache::with_clock(clock.clone());

        cache.put("k", "v".to_string());
        clock.advance(299_999);
        assert_eq!(cache.get_fresh("k", 300_000), Some("v".to_string()));
    }

    #[test]
    fn test_get_fresh_expired() {
        let clock = ManualClock::new(1_000);
        let cache: StaleCache<String> = StaleCache::with_clock(clock.clone());

        cache.put("k", "v".to_string());
        clock.advance(300_000);
        assert_eq!(cache.get_fresh("k", 300_000), None);
        // entry itself is still there
        assert!(cache.get("k").is_some());
    }

    #[test]
    fn test_put_overwrites() {
        let clock = ManualClock::new(0);
        let cache: StaleCache<u32> = StaleCache::with_clock(clock.clone());

        cache.put("k", 1);
        clock.advance(10);
        cache.put("k", 2);

        let entry = cache.get("k").unwrap();
        assert_eq!(entry.value, 2);
        assert_eq!(entry.fetched_at_ms, 10);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys() {
        let cache: StaleCache<u32> = StaleCache::new();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get("a").unwrap().value, 1);
        assert_eq!(cache.get("b").unwrap().value, 2);
        assert!(cache.get("c").is_none());
    }

    #[tokio::test]
    async fn test_fallback_serves_cached_on_failure() {
        let clock = ManualClock::new(0);
        let cache: StaleCache<String> = StaleCache::with_clock(clock.clone());

        // first fetch succeeds and populates the cache
        let value = with_stale_fallback(&cache, "k", 300_000, || async {
            Ok("fresh".to_string())
        })
        .await
        .unwrap();
        assert_eq!(value, "fresh");

        // 40 seconds later the upstream starts failing
        clock.advance(40_000);
        let value = with_stale_fallback(&cache, "k", 300_000, || async {
            Err::<String, _>(UpstreamError::Status(503))
        })
        .await
        .unwrap();
        assert_eq!(value, "fresh");
    }

    #[tokio::test]
    async fn test_fallback_expired_surfaces_error() {
        let clock = ManualClock::new(0);
        let cache: StaleCache<String> = StaleCache::with_clock(clock.clone());

        cache.put("k", "old".to_string());
        clock.advance(300_000);

        let result = with_stale_fallback(&cache, "k", 300_000, || async {
            Err::<String, _>(UpstreamError::Status(503))
        })
        .await;

        match result {
            Err(UpstreamError::Status(503)) => {}
            other => panic!("expected Status(503), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fallback_success_refreshes_timestamp() {
        let clock = ManualClock::new(0);
        let cache: StaleCache<u32> = StaleCache::with_clock(clock.clone());

        cache.put("k", 1);
        clock.advance(250_000);

        let value = with_stale_fallback(&cache, "k", 300_000, || async { Ok(2u32) })
            .await
            .unwrap();
        assert_eq!(value, 2);
        assert_eq!(cache.get("k").unwrap().fetched_at_ms, 250_000);
    }
}
