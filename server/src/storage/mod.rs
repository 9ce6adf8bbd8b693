//! Airport storage.
//!
//! [`AirportStore`] is the read-only data access seam used by the REST
//! handlers and as the dataset provider of the nearest airport search.

#[macro_use]
pub mod macros;
pub mod static_store;

pub use static_store::StaticAirportStore;

use crate::types::AirportRecord;
use async_trait::async_trait;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Error type for airport storage
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The airport data source could not be read
    CouldNotRead(String),

    /// A record in the data source is malformed
    InvalidRecord {
        /// 1-based record number, header excluded
        record: usize,
        /// What is wrong with the record
        reason: String,
    },

    /// Two records share an ICAO code
    DuplicateIcao(String),

    /// Two records share an identifier
    DuplicateId(i64),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageError::CouldNotRead(reason) => {
                write!(f, "Could not read airport data: {}", reason)
            }
            StorageError::InvalidRecord { record, reason } => {
                write!(f, "Invalid airport record #{}: {}", record, reason)
            }
            StorageError::DuplicateIcao(icao) => write!(f, "Duplicate ICAO code {}", icao),
            StorageError::DuplicateId(id) => write!(f, "Duplicate airport id {}", id),
        }
    }
}

impl std::error::Error for StorageError {}

/// Read access to the airport dataset
#[async_trait]
pub trait AirportStore: Send + Sync {
    /// All airports, in storage order
    async fn list_all(&self) -> Result<Arc<[AirportRecord]>, StorageError>;

    /// The airport with identifier `id`
    async fn get_by_id(&self, id: i64) -> Result<Option<AirportRecord>, StorageError>;

    /// The airport with ICAO code `icao`, ignoring case
    async fn get_by_icao(&self, icao: &str) -> Result<Option<AirportRecord>, StorageError>;
}
