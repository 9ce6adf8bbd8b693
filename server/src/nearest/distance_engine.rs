//! Brute force nearest airport search.
//!
//! Every airport is compared against the queried point, which is O(n) per
//! call. The datasets served here hold tens to a few hundred records.

use super::haversine;
use super::NearestError;
use crate::types::{AirportRecord, Coordinate, NearestResult};

/// Find the airport closest to `point`, measured along the Earth's surface.
///
/// When several airports are at exactly the same distance the first one in
/// `airports` is returned.
///
/// # Errors
/// * [`NearestError::InvalidCoordinate`] if `point` is out of range
/// * [`NearestError::EmptyDataset`] if `airports` is empty
pub fn nearest(
    airports: &[AirportRecord],
    point: &Coordinate,
) -> Result<NearestResult, NearestError> {
    point.validate().map_err(|e| {
        nearest_warn!("(nearest) rejected query point: {}", e);
        NearestError::InvalidCoordinate(e)
    })?;

    let mut closest: Option<(&AirportRecord, f64)> = None;
    for airport in airports {
        let distance_km = haversine::distance(point, &airport.coordinate());
        if closest.map_or(true, |(_, best)| distance_km < best) {
            closest = Some((airport, distance_km));
        }
    }

    let Some((airport, distance_km)) = closest else {
        nearest_error!("(nearest) no airports available to search.");
        return Err(NearestError::EmptyDataset);
    };

    nearest_debug!(
        "(nearest) {} ({}) is {:.3} km from {:?}.",
        airport.name,
        airport.icao,
        distance_km,
        point
    );

    Ok(NearestResult {
        airport: airport.clone(),
        distance_km,
    })
}
