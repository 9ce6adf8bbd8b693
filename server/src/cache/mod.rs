//! Key-value cache stores with per-entry expiry.
//!
//! [`CacheStore`] is the seam the nearest airport search writes through.
//! [`pool::RedisCache`] is used when a Redis URL is configured, otherwise
//! [`memory::MemoryCache`] keeps entries in process.

#[macro_use]
pub mod macros;
pub mod memory;
pub mod pool;

use async_trait::async_trait;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Represents errors that can occur during cache operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Could not build configuration for cache.
    CouldNotConfigure,

    /// Could not connect to the cache.
    CouldNotConnect,

    /// The operation on the cache failed.
    OperationFailed,
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            CacheError::CouldNotConfigure => write!(f, "Could not configure cache."),
            CacheError::CouldNotConnect => write!(f, "Could not connect to cache."),
            CacheError::OperationFailed => write!(f, "Cache operation failed."),
        }
    }
}

impl std::error::Error for CacheError {}

/// Byte keyed cache with expiring entries
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored at `key`, or `None` if absent or expired
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` at `key`, replacing any previous value. The entry
    /// expires after `ttl_seconds`.
    async fn set(&self, key: &[u8], value: &[u8], ttl_seconds: u64) -> Result<(), CacheError>;
}

/// Builds the cache store for the given configuration.
///
/// A Redis pool is used when `REDIS__URL` is set. Without it, or if the pool
/// can not be created, entries are kept in memory.
pub fn cache_from_config(config: &crate::Config) -> Arc<dyn CacheStore> {
    if config.redis.url.is_none() {
        cache_info!("(cache_from_config) no Redis URL configured, using in-memory cache.");
        return Arc::new(memory::MemoryCache::new());
    }

    match pool::RedisCache::new(config) {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            cache_warn!(
                "(cache_from_config) {}, falling back to in-memory cache.",
                e
            );
            Arc::new(memory::MemoryCache::new())
        }
    }
}
