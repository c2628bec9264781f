//! Shared fixtures for airroute-lib integration tests.

use std::io::Write;
use std::path::PathBuf;

use airroute_lib::{AirportDirectory, AirportRecord};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn record(
    iata: &str,
    name: &str,
    city: &str,
    country: &str,
    latitude: f64,
    longitude: f64,
) -> AirportRecord {
    AirportRecord {
        iata: iata.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        latitude,
        longitude,
    }
}

/// LAX/JFK/ORD plus a near-antipodal pair (NUL/ANT) that defeats the
/// Vincenty iteration and exercises the spherical fallback.
#[allow(dead_code)]
pub fn fixture_records() -> Vec<AirportRecord> {
    vec![
        record("LAX", "Los Angeles International", "Los Angeles", "US", 33.9425, -118.4081),
        record("JFK", "John F. Kennedy International", "New York", "US", 40.6413, -73.7781),
        record("ORD", "O'Hare International", "Chicago", "US", 41.9742, -87.9073),
        record("NUL", "Null Island Strip", "Gulf of Guinea", "XX", 0.0, 0.0),
        record("ANT", "Antimeridian Strip", "Pacific", "XX", 0.5, 179.7),
    ]
}

#[allow(dead_code)]
pub fn fixture_directory() -> AirportDirectory {
    AirportDirectory::from_records(fixture_records())
}

/// Test environment holding a CSV dataset written to a temp directory.
#[allow(dead_code)]
pub struct CsvFixture {
    /// Temp directory (dropped on struct drop)
    _temp_dir: TempDir,
    /// Path to the dataset file
    pub path: PathBuf,
}

#[allow(dead_code)]
impl CsvFixture {
    /// Write a dataset file with the standard fixture rows.
    pub fn standard() -> Self {
        let rows = fixture_records()
            .iter()
            .map(|r| {
                format!(
                    "{},{},{},{},{},{}",
                    r.iata, r.name, r.city, r.country, r.latitude, r.longitude
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self::with_rows(&rows)
    }

    /// Write a dataset file with the given data rows (header added here).
    pub fn with_rows(rows: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("airports.csv");

        let mut file = std::fs::File::create(&path).expect("create dataset file");
        writeln!(file, "iata,name,city,country,latitude,longitude").expect("write header");
        writeln!(file, "{rows}").expect("write rows");

        Self {
            _temp_dir: temp_dir,
            path,
        }
    }
}
