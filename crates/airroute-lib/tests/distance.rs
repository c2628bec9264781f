mod common;

use std::sync::{Arc, Mutex};

use airroute_lib::{
    haversine, vincenty, ConvergenceError, DistanceEngine, Error, FallbackObserver, GeoPoint,
};

/// Observer that records fallback notifications for assertions.
#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<(String, String)>>,
}

impl FallbackObserver for RecordingObserver {
    fn fallback_used(&self, from: &str, to: &str, _failure: &ConvergenceError) {
        self.events
            .lock()
            .expect("observer lock")
            .push((from.to_string(), to.to_string()));
    }
}

fn engine() -> DistanceEngine {
    DistanceEngine::new(Arc::new(common::fixture_directory()))
}

#[test]
fn lax_to_jfk_matches_ellipsoidal_reference() {
    let km = engine().calculate_distance("LAX", "JFK").expect("both known");
    // Reference value from the WGS-84 inverse solution.
    assert!((km - 3983.005).abs() < 0.5, "got {km}");
}

#[test]
fn distance_is_symmetric() {
    let engine = engine();
    let forward = engine.calculate_distance("LAX", "ORD").expect("forward");
    let backward = engine.calculate_distance("ORD", "LAX").expect("backward");
    assert!((forward - backward).abs() < 1e-9);
}

#[test]
fn distance_to_self_is_zero() {
    let engine = engine();
    for code in ["LAX", "JFK", "ORD"] {
        assert_eq!(engine.calculate_distance(code, code).expect("known"), 0.0);
    }
}

#[test]
fn ellipsoidal_and_spherical_agree_closely() {
    let lax = GeoPoint {
        latitude: 33.9425,
        longitude: -118.4081,
    };
    let jfk = GeoPoint {
        latitude: 40.6413,
        longitude: -73.7781,
    };

    let ellipsoidal = vincenty(lax, jfk).expect("converges");
    let spherical = haversine(lax, jfk);
    assert!((ellipsoidal - spherical).abs() / ellipsoidal < 0.005);
}

#[test]
fn unknown_code_propagates_unchanged() {
    let error = engine()
        .calculate_distance("LAX", "ZZZ")
        .expect_err("ZZZ absent");
    match error {
        Error::UnknownAirport { code } => assert_eq!(code, "ZZZ"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn near_antipodal_pair_falls_back_to_haversine() {
    let observer = Arc::new(RecordingObserver::default());
    let engine = DistanceEngine::new(Arc::new(common::fixture_directory()))
        .with_observer(observer.clone());

    // NUL (0, 0) and ANT (0.5, 179.7) are close enough to antipodal that the
    // Vincenty iteration never settles.
    let directory = common::fixture_directory();
    let nul = directory.lookup("NUL").expect("NUL present").position();
    let ant = directory.lookup("ANT").expect("ANT present").position();
    assert!(vincenty(nul, ant).is_err());

    let km = engine
        .calculate_distance("NUL", "ANT")
        .expect("fallback absorbs the failure");
    assert_eq!(km, haversine(nul, ant));

    let events = observer.events.lock().expect("observer lock");
    assert_eq!(events.as_slice(), &[("NUL".to_string(), "ANT".to_string())]);
}

#[test]
fn haversine_is_finite_for_exact_antipodes() {
    // An exact antipodal pair drives the haversine intermediate term right up
    // to 1.0; rounding past it would poison the result with NaN.
    let a = GeoPoint {
        latitude: -66.01271223801947,
        longitude: -19.872091107394766,
    };
    let b = GeoPoint {
        latitude: 66.01271294109138,
        longitude: 160.1279081479155,
    };

    let km = haversine(a, b);
    assert!(km.is_finite(), "got {km}");
    assert!(km >= 0.0, "got {km}");
    // Antipodal distance is half the sphere's circumference.
    let half_circumference = std::f64::consts::PI * 6371.0;
    assert!((km - half_circumference).abs() < 1.0, "got {km}");
}

#[test]
fn vincenty_identical_points_are_zero() {
    let point = GeoPoint {
        latitude: 33.9425,
        longitude: -118.4081,
    };
    assert_eq!(vincenty(point, point).expect("degenerate pair"), 0.0);
    assert_eq!(haversine(point, point), 0.0);
}
