//! Property-based tests for orbit geometry using proptest.
//!
//! These tests check that path sampling and propagation keep their
//! invariants across the whole elliptical element space.

use proptest::prelude::*;
use std::f64::consts::PI;

use super::geometry::{orbit_path, propagate, radius};
use super::OrbitalElements;
use crate::types::PATH_SAMPLE_COUNT;

fn elements_strategy() -> impl Strategy<Value = OrbitalElements> {
    (
        1.0f64..50.0,
        0.0f64..0.95,
        -180.0f64..180.0,
        0.0f64..360.0,
        0.0f64..360.0,
        0.0f64..360.0,
    )
        .prop_map(|(a, e, i, raan, w, nu)| OrbitalElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: i,
            raan,
            arg_periapsis: w,
            true_anomaly: nu,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Periapsis sits at theta = 0 and apoapsis at theta = π.
    #[test]
    fn prop_apsides_match_closed_form(
        a in 0.1f64..1000.0,
        e in 0.0f64..0.99,
    ) {
        let r_peri = radius(a, e, 0.0);
        let r_apo = radius(a, e, PI);
        prop_assert!(((r_peri - a * (1.0 - e)) / a).abs() < 1e-12);
        prop_assert!(((r_apo - a * (1.0 + e)) / a).abs() < 1e-12);
    }

    /// Adding a full turn to the true anomaly lands on the same point.
    #[test]
    fn prop_propagation_is_periodic(
        elements in elements_strategy(),
        turns in 1u32..20,
    ) {
        let shifted = elements.with_true_anomaly(elements.true_anomaly + 360.0 * turns as f64);
        let p0 = propagate(&elements);
        let p1 = propagate(&shifted);
        let scale = elements.apoapsis();
        prop_assert!(
            (p1 - p0).length() <= 1e-9 * scale,
            "period drift: {:?} vs {:?}", p0, p1
        );
    }

    /// The path size never depends on the element values.
    #[test]
    fn prop_path_sample_count_is_fixed(elements in elements_strategy()) {
        prop_assert_eq!(orbit_path(&elements).len(), PATH_SAMPLE_COUNT);
    }

    /// Rotations preserve distance: every path point lies between the apsides.
    #[test]
    fn prop_path_stays_between_apsides(elements in elements_strategy()) {
        let lo = elements.periapsis() * (1.0 - 1e-9);
        let hi = elements.apoapsis() * (1.0 + 1e-9);
        for point in orbit_path(&elements) {
            let r = point.length();
            prop_assert!(r >= lo && r <= hi, "r = {} outside [{}, {}]", r, lo, hi);
        }
    }

    /// The propagated distance equals the conic radius at the true anomaly.
    #[test]
    fn prop_propagated_distance_matches_radius(elements in elements_strategy()) {
        let expected = radius(
            elements.semi_major_axis,
            elements.eccentricity,
            elements.true_anomaly_rad(),
        );
        let actual = propagate(&elements).length();
        prop_assert!(((actual - expected) / expected).abs() < 1e-12);
    }

    /// Identical inputs give bit-identical outputs.
    #[test]
    fn prop_propagation_is_deterministic(elements in elements_strategy()) {
        prop_assert_eq!(propagate(&elements), propagate(&elements));
    }
}
