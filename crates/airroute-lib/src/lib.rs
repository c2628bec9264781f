//! Airroute library entry points.
//!
//! This crate exposes helpers to load the airport reference dataset into an
//! immutable IATA-keyed directory and compute geodesic distances along ordered
//! routes of airports. Higher-level consumers (HTTP services) should only
//! depend on the types exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod directory;
pub mod engine;
pub mod error;
pub mod geodesic;

pub use directory::{AirportDirectory, AirportRecord};
pub use engine::{DistanceEngine, FallbackObserver, TracingFallbackObserver};
pub use error::{Error, Result};
pub use geodesic::{haversine, vincenty, ConvergenceError, GeoPoint};
