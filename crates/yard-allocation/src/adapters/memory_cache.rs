//! In-memory TTL cache.
//!
//! Bounded LRU map from key to bytes. Each entry carries its own expiry;
//! expired entries read as a miss and are dropped on access.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::error::CacheError;
use crate::ports::CacheStore;

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// Cache adapter kept in process memory.
#[derive(Debug)]
pub struct InMemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
    outage: Mutex<Option<String>>,
}

impl InMemoryCache {
    /// Cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            outage: Mutex::new(None),
        }
    }

    /// Simulate the cache server going away (`Some`) or coming back (`None`).
    pub fn set_outage(&self, reason: Option<String>) {
        *self.outage.lock() = reason;
    }

    /// Live entries, expired ones excluded.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .peek(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    fn check_available(&self) -> Result<(), CacheError> {
        match self.outage.lock().as_ref() {
            Some(reason) => Err(CacheError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.check_available()?;
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()))
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.check_available()?;
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().put(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.check_available()?;
        self.entries.lock().pop(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.check_available()
    }
}
