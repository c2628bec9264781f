//! Geodesic distance math.
//!
//! Two algorithms are provided: the iterative Vincenty inverse solution on
//! the WGS-84 ellipsoid, and the closed-form haversine great-circle formula
//! on a mean-radius sphere. Vincenty is the more accurate of the two but can
//! fail to converge for near-antipodal inputs; that failure is reported as a
//! value so callers can substitute the haversine result.

use thiserror::Error;

/// Physical constants for the Earth models.
pub mod constants {
    /// WGS-84 semi-major axis (meters).
    pub const WGS84_SEMI_MAJOR_M: f64 = 6_378_137.0;

    /// WGS-84 flattening.
    pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

    /// Mean Earth radius used by the spherical approximation (kilometers).
    pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;
}

/// Iteration cap for the Vincenty inverse solution.
const MAX_ITERATIONS: usize = 200;

/// Convergence threshold for the longitude difference term (radians).
const CONVERGENCE_THRESHOLD: f64 = 1e-12;

/// A coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

/// Raised when the Vincenty iteration did not converge.
///
/// This is a recoverable condition, not a defect: the formula is known not
/// to converge for near-antipodal point pairs. It is deliberately kept out
/// of the library's public error enum because the engine always absorbs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("vincenty solution did not converge after {iterations} iterations")]
pub struct ConvergenceError {
    pub iterations: usize,
}

/// Vincenty inverse solution on the WGS-84 ellipsoid.
///
/// Returns the geodesic distance in kilometers, or a [`ConvergenceError`]
/// when the iteration fails to settle within the iteration cap. Identical
/// and coincident points short-circuit to 0.0.
pub fn vincenty(a: GeoPoint, b: GeoPoint) -> Result<f64, ConvergenceError> {
    if a == b {
        return Ok(0.0);
    }

    let major = constants::WGS84_SEMI_MAJOR_M;
    let f = constants::WGS84_FLATTENING;
    let minor = major * (1.0 - f);

    // Reduced latitudes on the auxiliary sphere.
    let u1 = ((1.0 - f) * a.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.latitude.to_radians().tan()).atan();
    let l = (b.longitude - a.longitude).to_radians();

    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // Coincident points.
            return Ok(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // cos_sq_alpha is zero for equatorial geodesics.
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if (lambda - previous).abs() < CONVERGENCE_THRESHOLD {
            let u_sq = cos_sq_alpha * (major * major - minor * minor) / (minor * minor);
            let a_term = 1.0
                + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let b_term = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = b_term
                * sin_sigma
                * (cos_2sigma_m
                    + b_term / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                            - b_term / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

            return Ok(minor * a_term * (sigma - delta_sigma) / 1000.0);
        }
    }

    Err(ConvergenceError {
        iterations: MAX_ITERATIONS,
    })
}

/// Haversine great-circle distance on a mean-radius sphere.
///
/// Always succeeds for finite input; used as the fallback when the
/// ellipsoidal solution fails to converge. Returns kilometers.
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    // Rounding can push h past 1.0 for near-antipodal pairs, which would
    // make the (1 - h) square root NaN; clamp to the valid range.
    let h = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    constants::MEAN_EARTH_RADIUS_KM * c
}
