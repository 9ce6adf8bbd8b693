//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in kilometers**.

use crate::types::Coordinate;

/// Mean radius of the Earth in kilometers
pub const RADIUS_EARTH_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two points on a sphere.
///
/// # Notes
/// The Earth is treated as a sphere of radius [`RADIUS_EARTH_KM`], not an
/// ellipsoid. Results are "as the crow flies" and can differ from
/// ellipsoidal distances by up to about 0.5%.
pub fn distance(start: &Coordinate, end: &Coordinate) -> f64 {
    let lat1 = start.latitude_radians();
    let lat2 = end.latitude_radians();
    let d_lat = lat2 - lat1;
    let d_lon = end.longitude_radians() - start.longitude_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // rounding can push `a` marginally above 1 for antipodal points
    2.0 * RADIUS_EARTH_KM * a.sqrt().min(1.0).asin()
}
