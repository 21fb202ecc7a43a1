//! # Bounded Lookup Cache
//!
//! A small, capacity-bounded cache for catalog/directory lookups.
//! Least-recently-used entries are evicted once the capacity is
//! reached, so the cache can never grow without bound during a long
//! event day.
//!
//! Owned by the repositories in this crate; the pipeline crates only
//! ever see the `Catalog`/`Directory` traits and stay cache-agnostic.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Mutex;

struct CacheInner<K, V> {
    entries: HashMap<K, V>,
    // Recency order, least-recently-used at the front.
    order: VecDeque<K>,
}

/// Capacity-bounded LRU cache with interior mutability.
pub struct BoundedCache<K, V> {
    capacity: usize,
    inner: Mutex<CacheInner<K, V>>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        BoundedCache {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Returns a clone of the cached value and refreshes its recency.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            // A poisoned cache behaves as a miss; the source of truth
            // is always the database.
            Err(_) => return None,
        };

        let value = inner.entries.get(key).cloned()?;
        if let Some(pos) = inner.order.iter().position(|k| k == key) {
            inner.order.remove(pos);
        }
        inner.order.push_back(key.clone());
        Some(value)
    }

    /// Inserts a value, evicting the least-recently-used entry when at
    /// capacity.
    pub fn insert(&self, key: K, value: V) {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };

        if inner.entries.contains_key(&key) {
            inner.entries.insert(key.clone(), value);
            if let Some(pos) = inner.order.iter().position(|k| k == &key) {
                inner.order.remove(pos);
            }
            inner.order.push_back(key);
            return;
        }

        while inner.entries.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.entries.insert(key.clone(), value);
        inner.order.push_back(key);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.entries.len()).unwrap_or(0)
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
