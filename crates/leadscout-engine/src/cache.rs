//! Run-scoped memoization for pure, parameter-stable lookups.
//!
//! Geocoding an area and label-analyzing an image are pure functions of
//! their input within one run, so repeated lookups are served from an
//! explicit cache. Hit/miss counters make caching behavior assertable in
//! tests. Caches are owned by a single run context — no locking, no
//! process-wide state.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct MemoCache<K, V> {
    map: HashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash, V> MemoCache<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up a cached value, counting the access as a hit or miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.map.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Content-addressed cache key for image bytes: SHA-256, hex-encoded.
#[must_use]
pub fn content_key(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    format!("{:x}", Sha256::digest(bytes))
}
