//! Nearest airport search with result caching.
//!
//! [`distance_engine::nearest`] scans the full dataset for the closest
//! airport. [`NearestQueryCache`] memoizes its results in a [`CacheStore`]
//! keyed by the queried coordinate, with a fixed time-to-live.

#[macro_use]
pub mod macros;
pub mod distance_engine;
pub mod haversine;

use crate::cache::CacheStore;
use crate::storage::{AirportStore, StorageError};
use crate::types::{AirportRecord, Coordinate, CoordinateError, NearestResult};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::future::Future;
use std::sync::Arc;

/// Default lifetime of a cached nearest airport result (5 minutes)
pub const NEAREST_CACHE_TTL_SECONDS: u64 = 5 * 60;

/// Prefix of every nearest airport cache key
pub const CACHE_KEY_PREFIX: &str = "airports:nearest";

/// Error type for nearest airport queries
#[derive(Debug, Clone, PartialEq)]
pub enum NearestError {
    /// The query point is outside of the valid degree ranges
    InvalidCoordinate(CoordinateError),

    /// There are no airports to search
    EmptyDataset,

    /// The airport dataset could not be read
    Storage(StorageError),
}

impl Display for NearestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NearestError::InvalidCoordinate(e) => write!(f, "Invalid coordinate: {}", e),
            NearestError::EmptyDataset => write!(f, "No airport data available"),
            NearestError::Storage(e) => write!(f, "Could not read airport data: {}", e),
        }
    }
}

impl std::error::Error for NearestError {}

/// Which path produced a [`NearestLookup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Result was read from the cache
    Hit,

    /// Result was computed and written to the cache
    Miss,
}

/// A nearest airport result and how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct NearestLookup {
    /// The nearest airport and its distance
    pub result: NearestResult,

    /// Whether the cache answered the query
    pub outcome: CacheOutcome,
}

/// Memoizes nearest airport results in a [`CacheStore`].
///
/// Concurrent misses for the same point may each compute and write the
/// result. Entries are idempotent, so the last write wins.
#[derive(Clone)]
pub struct NearestQueryCache {
    cache: Arc<dyn CacheStore>,
    ttl_seconds: u64,
}

impl std::fmt::Debug for NearestQueryCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NearestQueryCache")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl NearestQueryCache {
    /// Create a new [`NearestQueryCache`] writing entries with `ttl_seconds`
    pub fn new(cache: Arc<dyn CacheStore>, ttl_seconds: u64) -> Self {
        NearestQueryCache { cache, ttl_seconds }
    }

    /// Time-to-live of written entries in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Cache key for a query point.
    ///
    /// Both values are written with Rust's shortest round-trip float
    /// formatting, so distinct points get distinct keys and the same point
    /// gets the same key in every process.
    pub fn cache_key(point: &Coordinate) -> Vec<u8> {
        format!(
            "{}:{}:{}",
            CACHE_KEY_PREFIX, point.latitude, point.longitude
        )
        .into_bytes()
    }

    /// Return the nearest airport to `point`, from the cache if present.
    ///
    /// On a miss `dataset_provider` is called once, the result is computed
    /// with [`distance_engine::nearest`] and written to the cache. A hit
    /// never calls `dataset_provider`.
    ///
    /// Cache failures are logged and the query falls through to direct
    /// computation. Provider and search errors are returned unchanged and
    /// nothing is written.
    pub async fn get_or_compute<F, Fut, D>(
        &self,
        point: Coordinate,
        dataset_provider: F,
    ) -> Result<NearestLookup, NearestError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<D, StorageError>>,
        D: AsRef<[AirportRecord]>,
    {
        point.validate().map_err(|e| {
            nearest_warn!("(get_or_compute) rejected query point: {}", e);
            NearestError::InvalidCoordinate(e)
        })?;

        let key = Self::cache_key(&point);
        if let Some(result) = self.read(&key).await {
            nearest_info!("(get_or_compute) Cache hit!");
            return Ok(NearestLookup {
                result,
                outcome: CacheOutcome::Hit,
            });
        }

        nearest_info!("(get_or_compute) Calculating nearest airport!");
        let airports = dataset_provider().await.map_err(|e| {
            nearest_error!("(get_or_compute) could not read airports: {}", e);
            NearestError::Storage(e)
        })?;

        let result = distance_engine::nearest(airports.as_ref(), &point)?;
        self.write(&key, &result).await;

        Ok(NearestLookup {
            result,
            outcome: CacheOutcome::Miss,
        })
    }

    /// [`NearestQueryCache::get_or_compute`] with an [`AirportStore`] as
    /// the dataset provider
    pub async fn nearest_in_store(
        &self,
        point: Coordinate,
        store: &dyn AirportStore,
    ) -> Result<NearestLookup, NearestError> {
        self.get_or_compute(point, || store.list_all()).await
    }

    async fn read(&self, key: &[u8]) -> Option<NearestResult> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                nearest_warn!("(read) cache unavailable, computing directly: {}", e);
                return None;
            }
        };

        match serde_json::from_slice::<NearestResult>(&bytes) {
            Ok(result) => Some(result),
            Err(e) => {
                nearest_warn!("(read) discarding unreadable cache entry: {}", e);
                None
            }
        }
    }

    async fn write(&self, key: &[u8], result: &NearestResult) {
        let value = match serde_json::to_vec(result) {
            Ok(value) => value,
            Err(e) => {
                nearest_error!("(write) could not serialize result: {}", e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &value, self.ttl_seconds).await {
            nearest_warn!("(write) could not cache result: {}", e);
        }
    }
}
