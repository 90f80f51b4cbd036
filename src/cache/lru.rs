//! Thread-safe fixed-capacity LRU cache.
//!
//! A `HashMap` index points into a [`RecencyRing`]; both sit behind one
//! `Mutex` so every operation, reads included, sees and leaves a consistent
//! pair. `get` promotes the entry it returns, so it needs the lock
//! exclusively too.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace};

use super::ring::RecencyRing;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front. Larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// Index plus ring. Only ever touched through the cache's lock.
struct State<K, V> {
    index: HashMap<K, usize>,
    ring: RecencyRing<K, V>,
}

impl<K: Hash + Eq, V> State<K, V> {
    /// Drop the least recently used entry from both structures.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.ring.pop_back()?;
        self.index.remove(&key);
        trace!(remaining = self.ring.len(), "Evicted least recently used entry");
        Some((key, value))
    }
}

/// Fixed-capacity key/value cache with least-recently-used eviction.
///
/// Share across threads with `Arc<LruCache<K, V>>`. Values are handed out
/// by clone; nothing inside the cache is ever borrowed past a call.
///
/// ```rust
/// use ringlru::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// assert_eq!(cache.get("a"), Some(1)); // "a" is now most recent
///
/// cache.set("c", 3); // evicts "b"
/// assert_eq!(cache.get("b"), None);
/// assert_eq!(cache.keys(), vec!["c", "a"]);
/// ```
pub struct LruCache<K, V> {
    state: Mutex<State<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A zero capacity is rejected with [`CacheError::InvalidCapacity`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_config(&CacheConfig::with_capacity(capacity))
    }

    /// Create a cache from a validated [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        debug!(capacity = config.capacity, "Creating LRU cache");
        let reserve = config.capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            state: Mutex::new(State {
                index: HashMap::with_capacity(reserve),
                ring: RecencyRing::with_capacity(reserve),
            }),
            capacity: config.capacity,
        })
    }

    /// Look up `key`, promoting it to most recently used on a hit.
    ///
    /// Returns `None` on a miss; a miss has no side effects.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.lock();
        let slot = *state.index.get(key)?;
        state.ring.promote(slot);
        Some(state.ring.value(slot).clone())
    }

    /// Like [`get`](Self::get), but reports a miss as [`CacheError::NotFound`].
    pub fn lookup<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(CacheError::NotFound)
    }

    /// Read `key` without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let state = self.lock();
        let slot = *state.index.get(key)?;
        Some(state.ring.value(slot).clone())
    }

    /// Insert or update `key`, making it the most recently used entry.
    ///
    /// Returns the previous value when `key` was already cached. Inserting a
    /// new key into a full cache evicts the least recently used entry first,
    /// so the entry count never exceeds the capacity.
    pub fn set(&self, key: K, value: V) -> Option<V> {
        let mut state = self.lock();

        let existing = state.index.get(&key).copied();
        if let Some(slot) = existing {
            let previous = state.ring.replace_value(slot, value);
            state.ring.promote(slot);
            return Some(previous);
        }

        if state.ring.len() >= self.capacity {
            let _ = state.evict_lru();
        }

        let slot = state.ring.push_front(key.clone(), value);
        state.index.insert(key, slot);
        None
    }

    /// Whether `key` is cached. Does not promote.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().index.contains_key(key)
    }

    /// Snapshot of the cached keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.lock()
            .ring
            .iter()
            .map(|(_, key, _)| key.clone())
            .collect()
    }

    /// Return the number of entries currently in the cache.
    pub fn len(&self) -> usize {
        self.lock().ring.len()
    }

    /// Return `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // -- private helpers ---------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, State<K, V>> {
        self.state.lock().expect("lru cache lock poisoned")
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.state.lock().map(|s| s.ring.len()).ok();
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &len)
            .finish()
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone,
{
    /// Check that index and ring agree and return keys most recently used first.
    pub(crate) fn assert_invariants(&self) -> Vec<K> {
        let state = self.lock();
        let keys = state.ring.assert_consistent();

        assert_eq!(state.index.len(), state.ring.len(), "index/ring size mismatch");
        assert!(state.ring.len() <= self.capacity, "over capacity");
        for (slot, key, _) in state.ring.iter() {
            assert_eq!(state.index.get(key), Some(&slot), "index stale for {key:?}");
        }
        keys
    }

    /// Evict directly, bypassing `set`.
    pub(crate) fn force_evict(&self) -> Option<(K, V)> {
        self.lock().evict_lru()
    }
}
