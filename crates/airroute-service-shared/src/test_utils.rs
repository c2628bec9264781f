//! Test utilities for service handler testing.
//!
//! Provides an in-memory fixture directory and application state so handler
//! tests never touch the filesystem.

use std::sync::Arc;

use airroute_lib::{AirportDirectory, AirportRecord};

use crate::state::AppState;

/// Known airport codes in the fixture directory.
pub mod fixture_airports {
    /// Los Angeles International.
    pub const LAX: &str = "LAX";

    /// John F. Kennedy International.
    pub const JFK: &str = "JFK";

    /// O'Hare International.
    pub const ORD: &str = "ORD";

    /// Synthetic airport on Null Island; paired with [`ANT`] it defeats the
    /// ellipsoidal algorithm and forces the spherical fallback.
    pub const NUL: &str = "NUL";

    /// Synthetic near-antipode of [`NUL`].
    pub const ANT: &str = "ANT";
}

fn record(iata: &str, city: &str, latitude: f64, longitude: f64) -> AirportRecord {
    AirportRecord {
        iata: iata.to_string(),
        name: format!("{city} Airport"),
        city: city.to_string(),
        country: "US".to_string(),
        latitude,
        longitude,
    }
}

/// Build the standard in-memory fixture directory.
pub fn fixture_directory() -> AirportDirectory {
    AirportDirectory::from_records(vec![
        record(fixture_airports::LAX, "Los Angeles", 33.9425, -118.4081),
        record(fixture_airports::JFK, "New York", 40.6413, -73.7781),
        record(fixture_airports::ORD, "Chicago", 41.9742, -87.9073),
        record(fixture_airports::NUL, "Null Island", 0.0, 0.0),
        record(fixture_airports::ANT, "Antimeridian", 0.5, 179.7),
    ])
}

/// Build application state over the fixture directory.
pub fn fixture_state() -> AppState {
    AppState::from_directory(Arc::new(fixture_directory()))
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    crate::middleware::RequestId::generate().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_directory_contains_known_airports() {
        let directory = fixture_directory();
        assert_eq!(directory.len(), 5);
        for code in [
            fixture_airports::LAX,
            fixture_airports::JFK,
            fixture_airports::ORD,
        ] {
            assert!(directory.contains(code), "{code} missing from fixture");
        }
    }

    #[test]
    fn test_fixture_state_is_ready() {
        let state = fixture_state();
        assert!(state.airports_loaded() > 0);
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
