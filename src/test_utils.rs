//! Test utilities for orbit geometry and registry tests.
//!
//! Provides fixtures for common element sets and satellite parameters, plus
//! vector assertions with a readable failure message.

use bevy::math::DVec3;

/// Fixtures for creating test orbits and satellites.
pub mod fixtures {
    use bevy::prelude::*;

    use crate::orbit::OrbitalElements;
    use crate::satellite::SatelliteParams;

    /// A tilted, eccentric orbit that exercises every rotation.
    pub fn tilted_ellipse() -> OrbitalElements {
        OrbitalElements::elliptical(20.0, 0.35).with_orientation(28.5, 120.0, 45.0)
    }

    /// Satellite parameters with a name, speed and orbit.
    pub fn satellite(name: &str, elements: OrbitalElements, speed: f64) -> SatelliteParams {
        SatelliteParams {
            name: name.to_string(),
            color: Color::srgb(1.0, 0.0, 0.0),
            speed,
            elements,
        }
    }
}

/// Assert two vectors agree component-wise within `tolerance`.
pub fn assert_vec_close(actual: DVec3, expected: DVec3, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff.max_element() <= tolerance,
        "vectors differ by {:?} (tolerance {}): actual {:?}, expected {:?}",
        diff,
        tolerance,
        actual,
        expected
    );
}
