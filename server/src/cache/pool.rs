//! Redis connection pool implementation

use super::{CacheError, CacheStore};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, Runtime};
use std::fmt::{Debug, Formatter};

/// Represents a pool of connections to a Redis server.
///
/// The [`RedisCache`] struct provides a managed pool of connections to a Redis server.
/// Connections are taken from the pool for a single command and returned
/// to it afterwards.
#[derive(Clone)]
pub struct RedisCache {
    /// The underlying pool of Redis connections.
    pool: Pool,
}

impl Debug for RedisCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RedisCache").finish()
    }
}

impl RedisCache {
    /// Create a new RedisCache
    ///
    /// Creating the pool does not open a connection, an unreachable server
    /// is only noticed on the first command.
    pub fn new(config: &crate::Config) -> Result<RedisCache, CacheError> {
        // the .env file must have REDIS__URL="redis://\<host\>:\<port\>"
        let cfg: deadpool_redis::Config = config.redis.clone();
        let Some(details) = cfg.url.clone() else {
            cache_error!("(RedisCache new) no connection address found.");
            return Err(CacheError::CouldNotConfigure);
        };

        cache_info!("(RedisCache new) creating pool at {:?}...", details);

        match cfg.create_pool(Some(Runtime::Tokio1)) {
            Ok(pool) => {
                cache_info!("(RedisCache new) pool created.");
                Ok(RedisCache { pool })
            }
            Err(e) => {
                cache_error!("(RedisCache new) could not create pool: {}", e);
                Err(CacheError::CouldNotConfigure)
            }
        }
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, CacheError> {
        self.pool.get().await.map_err(|e| {
            cache_error!(
                "(RedisCache connection) could not get connection from pool: {}",
                e
            );
            CacheError::CouldNotConnect
        })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, CacheError> {
        let mut connection = self.connection().await?;

        match connection.get::<_, Option<Vec<u8>>>(key).await {
            Ok(value) => {
                cache_debug!(
                    "(RedisCache get) key '{}' found: {}",
                    String::from_utf8_lossy(key),
                    value.is_some()
                );
                Ok(value)
            }
            Err(e) => {
                cache_error!("(RedisCache get) unexpected redis response: {:?}", e);
                Err(CacheError::OperationFailed)
            }
        }
    }

    async fn set(&self, key: &[u8], value: &[u8], ttl_seconds: u64) -> Result<(), CacheError> {
        let Ok(ttl_seconds) = TryInto::<usize>::try_into(ttl_seconds) else {
            cache_error!("(RedisCache set) Could not convert expiry into redis usize type.");
            return Err(CacheError::OperationFailed);
        };

        let mut connection = self.connection().await?;

        // SET with EX writes value and expiry in a single command
        match connection.set_ex::<_, _, ()>(key, value, ttl_seconds).await {
            Ok(()) => {
                cache_debug!(
                    "(RedisCache set) key '{}' stored for {}s.",
                    String::from_utf8_lossy(key),
                    ttl_seconds
                );
                Ok(())
            }
            Err(e) => {
                cache_error!("(RedisCache set) could not set key: {}", e);
                Err(CacheError::OperationFailed)
            }
        }
    }
}
