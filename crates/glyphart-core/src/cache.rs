//! Remember finished art so repeated requests feel instant
//!
//! [`ResultCache`] is a bounded LRU map from [`CacheKey`] to a shared
//! [`RenderResult`]. Lookups refresh recency, stores evict the least recently
//! used entry once the bound is reached, and every lookup is counted so the
//! hit rate can be reported.
//!
//! The map sits behind a mutex only so the cache can be shared behind `&self`.
//! The coordinator is its sole caller and runs one generation at a time, so a
//! lookup followed by a store never interleaves with another request's.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;

use crate::cache_key::CacheKey;
use crate::error::{GlyphartError, Result};
use crate::result::RenderResult;

/// Default bound on stored results
pub const DEFAULT_CAPACITY: usize = 50;

/// A stored result plus its bookkeeping
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub value: Arc<RenderResult>,
    pub inserted_at: Instant,
    pub last_used_at: Instant,
}

/// Everything you need to know about cache performance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatistics {
    pub lookups: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    pub size: usize,
    pub capacity: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

struct Inner {
    entries: LruCache<CacheKey, CacheEntry>,
    counters: Counters,
}

/// Bounded LRU memo of render results
pub struct ResultCache {
    inner: Mutex<Inner>,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` results
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = non_zero(capacity)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                counters: Counters::default(),
            }),
        })
    }

    /// Find a stored result; a hit becomes the most recently used entry
    pub fn lookup(&self, key: &CacheKey) -> Option<Arc<RenderResult>> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used_at = Instant::now();
                let value = Arc::clone(&entry.value);
                inner.counters.hits += 1;
                log::trace!("Cache hit: {key}");
                Some(value)
            },
            None => {
                inner.counters.misses += 1;
                log::trace!("Cache miss: {key}");
                None
            },
        }
    }

    /// Store a result as the most recently used entry
    ///
    /// An existing entry under the same key is replaced; otherwise the least
    /// recently used entry makes room when the cache is full.
    pub fn store(&self, key: CacheKey, value: Arc<RenderResult>) {
        let mut inner = self.inner.lock();
        inner.entries.pop(&key);

        let now = Instant::now();
        let entry = CacheEntry {
            key: key.clone(),
            value,
            inserted_at: now,
            last_used_at: now,
        };
        if let Some((evicted, _)) = inner.entries.push(key, entry) {
            inner.counters.evictions += 1;
            log::debug!("Evicted least recently used result: {evicted}");
        }
    }

    /// Drop one entry; reports whether it was there
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.inner.lock().entries.pop(key).is_some()
    }

    /// Drop every entry inserted more than `max_age` ago
    pub fn purge_older_than(&self, max_age: Duration) -> usize {
        let mut inner = self.inner.lock();
        let stale: Vec<CacheKey> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.inserted_at.elapsed() > max_age)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            inner.entries.pop(key);
        }
        if !stale.is_empty() {
            log::debug!("Purged {} results older than {:?}", stale.len(), max_age);
        }
        stale.len()
    }

    /// Change the bound; shrinking evicts least recently used entries first
    pub fn resize(&self, capacity: usize) -> Result<()> {
        let capacity = non_zero(capacity)?;
        let mut inner = self.inner.lock();
        let overflow = inner.entries.len().saturating_sub(capacity.get());
        inner.entries.resize(capacity);
        inner.counters.evictions += overflow as u64;
        if overflow > 0 {
            log::debug!("Resize to {capacity} evicted {overflow} results");
        }
        Ok(())
    }

    /// Forget every entry; counters survive
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Look at an entry without touching recency or counters
    pub fn peek(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.inner.lock().entries.peek(key).cloned()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.lock().entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Vec<CacheKey> {
        self.inner
            .lock()
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Snapshot of counters and occupancy
    pub fn statistics(&self) -> CacheStatistics {
        let inner = self.inner.lock();
        let Counters {
            hits,
            misses,
            evictions,
        } = inner.counters;
        let lookups = hits + misses;
        CacheStatistics {
            lookups,
            hits,
            misses,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
            evictions,
            size: inner.entries.len(),
            capacity: inner.entries.cap().get(),
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(DEFAULT_NON_ZERO_CAPACITY),
                counters: Counters::default(),
            }),
        }
    }
}

const DEFAULT_NON_ZERO_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CAPACITY) {
    Some(v) => v,
    None => unreachable!(),
};

fn non_zero(capacity: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(capacity)
        .ok_or_else(|| GlyphartError::Config("cache capacity must be at least 1".into()))
}
