//! Short-lived cache of group search results.
//!
//! Entries are keyed by the BLAKE3 hash of the sanitized search text and are
//! allowed to be stale for up to the configured TTL. The cache is bounded;
//! the least recently used term is evicted first.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::types::GroupDetails;

/// 32-byte BLAKE3 digest of a search term.
pub type SearchKey = [u8; 32];

/// Hash a search term into its cache key.
pub fn search_key(text: &str) -> SearchKey {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Source of the current time for expiry checks.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Default, Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[derive(Debug, Clone)]
struct CachedSearch<V> {
    stored_at: Instant,
    value: V,
}

/// Bounded, time-limited map from a search term (or any other text key) to
/// a cloned value. Holds search results unless told otherwise.
#[derive(Debug)]
pub struct SearchCache<C: Clock = SystemClock, V = Vec<GroupDetails>> {
    entries: Mutex<LruCache<SearchKey, CachedSearch<V>>>,
    ttl: Duration,
    clock: C,
}

impl<V: Clone> SearchCache<SystemClock, V> {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        SearchCache::with_clock(capacity, ttl, SystemClock)
    }
}

impl<C: Clock, V: Clone> SearchCache<C, V> {
    pub fn with_clock(capacity: NonZeroUsize, ttl: Duration, clock: C) -> Self {
        SearchCache { entries: Mutex::new(LruCache::new(capacity)), ttl, clock }
    }

    /// Returns the cached value for `text` if present and still fresh.
    /// Expired entries are dropped on lookup.
    pub fn get(&self, text: &str) -> Option<V> {
        let key = search_key(text);
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let fresh = match entries.get(&key) {
            Some(hit) => now.saturating_duration_since(hit.stored_at) < self.ttl,
            None => return None,
        };
        if !fresh {
            entries.pop(&key);
            return None;
        }
        entries.get(&key).map(|hit| hit.value.clone())
    }

    /// Stores `value` for `text` unless a fresh entry already exists.
    /// Returns whether the entry was written.
    pub fn add(&self, text: &str, value: V) -> bool {
        let key = search_key(text);
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = entries.peek(&key) {
            if now.saturating_duration_since(existing.stored_at) < self.ttl {
                return false;
            }
        }
        entries.put(key, CachedSearch { stored_at: now, value });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualClock;

    fn cache(capacity: usize, ttl_secs: u64) -> (SearchCache<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = SearchCache::with_clock(
            NonZeroUsize::new(capacity).unwrap(),
            Duration::from_secs(ttl_secs),
            clock.clone(),
        );
        (cache, clock)
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache(4, 60);
        assert!(cache.add("staff", vec![GroupDetails::basic("staff")]));
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("staff").unwrap()[0].id, "staff");
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let (cache, clock) = cache(4, 60);
        cache.add("staff", vec![GroupDetails::basic("staff")]);
        clock.advance(Duration::from_secs(60));
        assert!(cache.get("staff").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_add_does_not_overwrite_fresh_entry() {
        let (cache, clock) = cache(4, 60);
        assert!(cache.add("staff", vec![GroupDetails::basic("first")]));
        assert!(!cache.add("staff", vec![GroupDetails::basic("second")]));
        assert_eq!(cache.get("staff").unwrap()[0].id, "first");

        clock.advance(Duration::from_secs(61));
        assert!(cache.add("staff", vec![GroupDetails::basic("third")]));
        assert_eq!(cache.get("staff").unwrap()[0].id, "third");
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let (cache, _clock) = cache(2, 60);
        cache.add("aa", vec![]);
        cache.add("bb", vec![]);
        cache.get("aa");
        cache.add("cc", vec![]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("bb").is_none());
        assert!(cache.get("aa").is_some());
    }

    #[test]
    fn test_single_record_values() {
        let clock = ManualClock::new();
        let cache: SearchCache<ManualClock, GroupDetails> =
            SearchCache::with_clock(NonZeroUsize::new(4).unwrap(), Duration::from_secs(1200), clock.clone());

        cache.add("CN=Web,DC=example", GroupDetails::basic("CN=Web,DC=example"));
        assert_eq!(cache.get("CN=Web,DC=example").unwrap().id, "CN=Web,DC=example");
        clock.advance(Duration::from_secs(1200));
        assert!(cache.get("CN=Web,DC=example").is_none());
    }

    #[test]
    fn test_search_key_is_stable() {
        assert_eq!(search_key("staff"), search_key("staff"));
        assert_ne!(search_key("staff"), search_key("Staff"));
    }
}
