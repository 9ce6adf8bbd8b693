//! test utilities. Provides log macros and fixture data for unit tests.

use crate::storage::StaticAirportStore;
use crate::types::AirportRecord;

/// Writes a debug! message to the test::ut logger
#[macro_export]
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test::ut", $($arg)+)
    };
}

/// Writes an info! message to the test::ut logger
#[macro_export]
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test::ut", $($arg)+)
    };
}

/// Writes an warn! message to the test::ut logger
#[macro_export]
macro_rules! ut_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "test::ut", $($arg)+)
    };
}

/// Writes an error! message to the test::ut logger
#[macro_export]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test::ut", $($arg)+)
    };
}

/// HONINGTON, first record of the bundled dataset
pub fn honington() -> AirportRecord {
    AirportRecord {
        id: 1,
        name: String::from("HONINGTON"),
        icao: String::from("EGXH"),
        latitude: 52.342611,
        longitude: 0.772939,
    }
}

/// HEATHROW, ninth record of the bundled dataset
pub fn heathrow() -> AirportRecord {
    AirportRecord {
        id: 9,
        name: String::from("HEATHROW"),
        icao: String::from("EGLL"),
        latitude: 51.4775,
        longitude: -0.461389,
    }
}

/// WELSHPOOL, used together with [`honington`] as a two record dataset
pub fn welshpool() -> AirportRecord {
    AirportRecord {
        id: 2,
        name: String::from("WELSHPOOL"),
        icao: String::from("EGCW"),
        latitude: 52.6286,
        longitude: -3.1533,
    }
}

/// Store loaded from the bundled UK dataset
pub fn bundled_store() -> StaticAirportStore {
    match StaticAirportStore::bundled() {
        Ok(store) => store,
        Err(e) => panic!("(bundled_store) could not load bundled airports: {}", e),
    }
}
