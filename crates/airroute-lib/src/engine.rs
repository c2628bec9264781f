use std::fmt;
use std::sync::Arc;

use tracing::error;

use crate::directory::AirportDirectory;
use crate::error::Result;
use crate::geodesic::{self, ConvergenceError};

/// Callback invoked when the ellipsoidal algorithm fails and the spherical
/// fallback result is substituted.
///
/// Injected as a capability rather than reached through a global so the
/// engine stays testable in isolation; production wiring uses
/// [`TracingFallbackObserver`].
pub trait FallbackObserver: Send + Sync {
    /// Called with the code pair and the underlying convergence failure.
    fn fallback_used(&self, from: &str, to: &str, failure: &ConvergenceError);
}

/// Default observer: records the fallback through `tracing` at error severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFallbackObserver;

impl FallbackObserver for TracingFallbackObserver {
    fn fallback_used(&self, from: &str, to: &str, failure: &ConvergenceError) {
        error!(
            from,
            to,
            error = %failure,
            "ellipsoidal distance failed to converge, substituting spherical fallback"
        );
    }
}

/// Distance calculator over a loaded airport directory.
///
/// Stateless aside from the shared directory reference; cheap to clone and
/// safe to use from concurrent requests.
#[derive(Clone)]
pub struct DistanceEngine {
    directory: Arc<AirportDirectory>,
    observer: Arc<dyn FallbackObserver>,
}

impl DistanceEngine {
    /// Create an engine over the given directory with the tracing observer.
    pub fn new(directory: Arc<AirportDirectory>) -> Self {
        Self {
            directory,
            observer: Arc::new(TracingFallbackObserver),
        }
    }

    /// Replace the fallback observer.
    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Access the underlying directory.
    pub fn directory(&self) -> &AirportDirectory {
        &self.directory
    }

    /// Geodesic distance in kilometers between two airports.
    ///
    /// Both codes are resolved against the directory before any arithmetic;
    /// lookup failures propagate unchanged. The Vincenty result is preferred,
    /// and on non-convergence the observer is notified and the haversine
    /// distance is returned instead — the primary algorithm's failure never
    /// reaches the caller.
    pub fn calculate_distance(&self, from: &str, to: &str) -> Result<f64> {
        let start = self.directory.lookup(from)?;
        let end = self.directory.lookup(to)?;

        match geodesic::vincenty(start.position(), end.position()) {
            Ok(km) => Ok(km),
            Err(failure) => {
                self.observer.fallback_used(from, to, &failure);
                Ok(geodesic::haversine(start.position(), end.position()))
            }
        }
    }

    /// Total distance in kilometers along an ordered route of airports.
    ///
    /// Sums the distance of every consecutive pair. Zero or one code yields
    /// 0.0. The first failing lookup aborts the whole computation with that
    /// error; no partial sum is produced.
    pub fn calculate_multipart_distance<S: AsRef<str>>(&self, codes: &[S]) -> Result<f64> {
        let mut total = 0.0;
        for pair in codes.windows(2) {
            total += self.calculate_distance(pair[0].as_ref(), pair[1].as_ref())?;
        }
        Ok(total)
    }
}

impl fmt::Debug for DistanceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceEngine")
            .field("airports", &self.directory.len())
            .finish()
    }
}
