//! Struct definitions and implementations for [`Coordinate`].

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Lowest accepted latitude in degrees
pub const MIN_LATITUDE: f64 = -90.0;
/// Highest accepted latitude in degrees
pub const MAX_LATITUDE: f64 = 90.0;
/// Lowest accepted longitude in degrees
pub const MIN_LONGITUDE: f64 = -180.0;
/// Highest accepted longitude in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the Earth's surface in degrees.
///
/// A valid [`Coordinate`] has a latitude in `[-90, 90]` and a longitude in
/// `[-180, 180]`. The REST layer checks this before a request reaches the
/// nearest airport search, and the search checks it again with
/// [`Coordinate::validate`].
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    /// The latitude in degrees.
    pub latitude: f64,

    /// The longitude in degrees.
    pub longitude: f64,
}

/// Reasons a [`Coordinate`] is rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    /// Latitude outside of `[-90, 90]` or not a number
    LatitudeOutOfRange(f64),

    /// Longitude outside of `[-180, 180]` or not a number
    LongitudeOutOfRange(f64),
}

impl Display for CoordinateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CoordinateError::LatitudeOutOfRange(value) => write!(
                f,
                "Latitude {} is outside of [{}, {}]",
                value, MIN_LATITUDE, MAX_LATITUDE
            ),
            CoordinateError::LongitudeOutOfRange(value) => write!(
                f,
                "Longitude {} is outside of [{}, {}]",
                value, MIN_LONGITUDE, MAX_LONGITUDE
            ),
        }
    }
}

impl Coordinate {
    /// Creates a new [`Coordinate`] without checking its range
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Checks the latitude and longitude ranges. NaN is never in range.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }

        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }

        Ok(())
    }

    /// Latitude in radians
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians
    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }
}
