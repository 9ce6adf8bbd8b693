//! Value types shared by the storage, nearest search and REST layers.

pub mod airport;
pub mod coordinate;

pub use airport::{AirportRecord, NearestResult};
pub use coordinate::{Coordinate, CoordinateError};
