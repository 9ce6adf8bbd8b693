//! In-process cache store, used when no Redis server is configured.

use super::{CacheError, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe map of expiring entries.
///
/// Expiry follows the tokio clock, so tests can pause and advance time.
/// Expired entries are dropped when read and on every write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    store: RwLock<HashMap<Vec<u8>, CacheEntry>>,
}

impl MemoryCache {
    /// Create an empty [`MemoryCache`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.store
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// True if there are no live entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, CacheError> {
        let now = Instant::now();
        {
            let store = self.store.read().await;
            match store.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => (),
                None => return Ok(None),
            }
        }

        cache_debug!(
            "(MemoryCache get) key '{}' expired.",
            String::from_utf8_lossy(key)
        );
        let mut store = self.store.write().await;
        if store.get(key).is_some_and(|entry| entry.is_expired(now)) {
            store.remove(key);
        }

        Ok(None)
    }

    async fn set(&self, key: &[u8], value: &[u8], ttl_seconds: u64) -> Result<(), CacheError> {
        let now = Instant::now();
        let Some(expires_at) = now.checked_add(Duration::from_secs(ttl_seconds)) else {
            cache_error!("(MemoryCache set) expiry of {}s is out of range.", ttl_seconds);
            return Err(CacheError::OperationFailed);
        };

        let mut store = self.store.write().await;
        store.retain(|_, entry| !entry.is_expired(now));
        store.insert(
            key.to_vec(),
            CacheEntry {
                value: value.to_vec(),
                expires_at,
            },
        );

        Ok(())
    }
}
