//! Application state for the HTTP service.
//!
//! The airport directory is loaded once at startup and shared read-only with
//! every handler; no writer exists after load, so no locking is needed.

use std::path::Path;
use std::sync::Arc;

use airroute_lib::{AirportDirectory, DistanceEngine, Error as LibError, FallbackObserver};

/// Error during application state initialization.
///
/// All variants are fatal at startup: the service must not accept traffic
/// with a partially loaded or absent directory.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load the airport dataset.
    DirectoryLoad(LibError),

    /// Dataset file not found.
    DatasetNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryLoad(e) => write!(f, "failed to load airport directory: {}", e),
            Self::DatasetNotFound(path) => write!(f, "airport dataset not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::DirectoryLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    directory: Arc<AirportDirectory>,
    engine: DistanceEngine,
}

impl AppState {
    /// Load application state from a CSV dataset file.
    ///
    /// Fails when the dataset is missing, malformed, or empty; the caller is
    /// expected to treat this as fatal.
    pub fn load(dataset_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let dataset_path = dataset_path.as_ref();

        if !dataset_path.exists() {
            return Err(AppStateError::DatasetNotFound(
                dataset_path.display().to_string(),
            ));
        }

        tracing::info!(path = %dataset_path.display(), "loading airport directory");
        let directory = Arc::new(AirportDirectory::load(dataset_path)?);
        tracing::info!(
            airports = directory.len(),
            "airport directory loaded successfully"
        );

        Ok(Self::from_directory(directory))
    }

    /// Create application state from a pre-built directory.
    ///
    /// This is useful for testing or when the dataset is embedded.
    pub fn from_directory(directory: Arc<AirportDirectory>) -> Self {
        let engine = DistanceEngine::new(directory.clone());
        Self {
            inner: Arc::new(AppStateInner { directory, engine }),
        }
    }

    /// Replace the engine's fallback observer.
    ///
    /// Services use this to attach metrics recording to fallback events on
    /// top of the engine's default tracing output.
    pub fn with_fallback_observer(self, observer: Arc<dyn FallbackObserver>) -> Self {
        let directory = self.inner.directory.clone();
        let engine = DistanceEngine::new(directory.clone()).with_observer(observer);
        Self {
            inner: Arc::new(AppStateInner { directory, engine }),
        }
    }

    /// Access the loaded airport directory.
    pub fn directory(&self) -> &AirportDirectory {
        &self.inner.directory
    }

    /// Access the distance engine.
    pub fn engine(&self) -> &DistanceEngine {
        &self.inner.engine
    }

    /// Number of airports available for lookup.
    pub fn airports_loaded(&self) -> usize {
        self.inner.directory.len()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("airports_loaded", &self.inner.directory.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_directory;

    #[test]
    fn test_app_state_from_directory() {
        let state = AppState::from_directory(Arc::new(fixture_directory()));

        assert_eq!(state.airports_loaded(), state.directory().len());
        assert!(state.directory().contains("LAX"));
    }

    #[test]
    fn test_app_state_clone_shares_inner() {
        let state1 = AppState::from_directory(Arc::new(fixture_directory()));
        let state2 = state1.clone();

        assert_eq!(state1.airports_loaded(), state2.airports_loaded());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_directory(Arc::new(fixture_directory()));
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("airports_loaded"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load("/nonexistent/path/to/airports.csv");

        match result.unwrap_err() {
            AppStateError::DatasetNotFound(path) => assert!(path.contains("nonexistent")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::DatasetNotFound("/path/to/airports.csv".to_string());
        assert!(err.to_string().contains("/path/to/airports.csv"));
        assert!(err.to_string().contains("not found"));
    }
}
