use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geodesic::GeoPoint;

/// A single airport from the reference dataset.
///
/// Only latitude and longitude participate in distance math; the remaining
/// columns are carried through for presentation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirportRecord {
    /// 3-letter IATA code, uppercase by dataset convention.
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

impl AirportRecord {
    /// Coordinate pair used by the distance math.
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Immutable IATA-keyed airport table.
///
/// Built once at startup and read-only thereafter, so it can be shared across
/// concurrent requests behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: HashMap<String, AirportRecord>,
}

impl AirportDirectory {
    /// Load the directory from a CSV dataset.
    ///
    /// The load is atomic: any parse failure aborts the whole load so the
    /// process never starts with a partially populated directory. Rows with
    /// out-of-range coordinates or a key that is not exactly 3 characters are
    /// skipped and counted rather than propagated as corrupt entries.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut airports = HashMap::new();
        let mut skipped_rows = 0usize;

        for row in reader.deserialize() {
            let record: AirportRecord = row?;
            if !usable_row(&record) {
                skipped_rows += 1;
                continue;
            }
            airports.insert(record.iata.clone(), record);
        }

        if skipped_rows > 0 {
            warn!(
                skipped_rows,
                path = %path.display(),
                "ignored dataset rows with invalid key or coordinates",
            );
        }

        if airports.is_empty() {
            return Err(Error::EmptyDataset {
                path: path.to_path_buf(),
            });
        }

        debug!(airports = airports.len(), path = %path.display(), "airport directory loaded");
        Ok(Self { airports })
    }

    /// Build a directory from pre-parsed records.
    ///
    /// This is useful for testing or when the dataset is embedded.
    pub fn from_records(records: impl IntoIterator<Item = AirportRecord>) -> Self {
        let airports = records
            .into_iter()
            .map(|record| (record.iata.clone(), record))
            .collect();
        Self { airports }
    }

    /// Resolve an IATA code against the table.
    ///
    /// Absence from the directory is the validity criterion: codes of the
    /// wrong length simply never match a stored key, so they fail the same
    /// way as well-formed but unknown codes. The match is case-sensitive.
    pub fn lookup(&self, code: &str) -> Result<&AirportRecord> {
        self.airports.get(code).ok_or_else(|| Error::UnknownAirport {
            code: code.to_string(),
        })
    }

    /// Whether the given code resolves to an airport.
    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    /// Number of airports in the directory.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Whether the directory holds no airports.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

fn usable_row(record: &AirportRecord) -> bool {
    record.iata.len() == 3
        && (-90.0..=90.0).contains(&record.latitude)
        && (-180.0..=180.0).contains(&record.longitude)
}
