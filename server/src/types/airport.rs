//! Airport records and nearest search results.

use super::Coordinate;
use serde::{Deserialize, Serialize};

/// A single airport as held by the airport store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    /// Identifier, unique within the store
    pub id: i64,

    /// Airport name
    pub name: String,

    /// Four letter ICAO code, unique within the store
    pub icao: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

impl AirportRecord {
    /// Location of the airport
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// The airport closest to a queried point and its great-circle
/// distance to that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestResult {
    /// The nearest airport
    pub airport: AirportRecord,

    /// Distance in kilometers
    pub distance_km: f64,
}
