//! Time-bounded response memo for the HTTP API.
//!
//! The engine itself never caches. Handlers use this memo to skip
//! recomputing identical requests within a short window.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

/// Default lifetime of a cached entry.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default maximum number of cached entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// An in-memory key/value memo whose entries expire after a fixed lifetime.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    entries: Arc<Mutex<HashMap<String, (Instant, V)>>>,
    ttl: Duration,
    capacity: usize,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache.
    ///
    /// A zero `ttl` or `capacity` disables caching.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            capacity,
        }
    }

    /// Returns the cached value for `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a value, evicting expired entries first when the cache is full.
    pub fn insert(&self, key: String, value: V) {
        if self.ttl.is_zero() || self.capacity == 0 {
            return;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let ttl = self.ttl;
            entries.retain(|_, (inserted, _)| inserted.elapsed() < ttl);
            if entries.len() >= self.capacity {
                debug!(capacity = self.capacity, "Response cache full, clearing");
                entries.clear();
            }
        }
        entries.insert(key, (Instant::now(), value));
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// The computation runs without holding the lock. Errors are not cached.
    pub fn get_or_try_insert_with<E, F>(&self, key: &str, compute: F) -> Result<(V, bool), E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            debug!("Response cache hit");
            return Ok((value, true));
        }

        let value = compute()?;
        self.insert(key.to_string(), value.clone());
        Ok((value, false))
    }

    /// Returns the number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
