//! REST API for the airport service

#[macro_use]
pub mod macros;
pub mod api;
pub mod server;
