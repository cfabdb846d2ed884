//! Orbit path sampling and single-point propagation.
//!
//! Both operations share the polar conic radius and the [`orient`] rotation
//! sequence, so a sampled path and a propagated position always agree.

use bevy::math::{DQuat, DVec3};

use super::OrbitalElements;
use crate::types::{DEG_TO_RAD, PATH_SAMPLE_COUNT, PATH_SAMPLE_STEP};

/// Distance from the focus at angle `theta` (radians) via the polar conic
/// equation r = a(1 − e²) / (1 + e·cos θ).
///
/// No guarding: e ≥ 1 yields negative, infinite or NaN radii.
pub fn radius(semi_major_axis: f64, eccentricity: f64, theta: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * theta.cos())
}

/// Rotate an orbital-plane vector into the scene frame.
///
/// Three axis-angle rotations applied in series to the same vector: about X
/// by `inclination`, then the result about Y by `raan`, then that result
/// about Z by `arg_periapsis`. All angles in radians. Existing outputs depend
/// on this exact order; do not fold it into a different Euler sequence.
pub fn orient(v: DVec3, inclination: f64, raan: f64, arg_periapsis: f64) -> DVec3 {
    let v = DQuat::from_axis_angle(DVec3::X, inclination) * v;
    let v = DQuat::from_axis_angle(DVec3::Y, raan) * v;
    DQuat::from_axis_angle(DVec3::Z, arg_periapsis) * v
}

/// Orientation angles of an element set, pre-converted to radians.
#[derive(Clone, Copy, Debug)]
struct Orientation {
    inclination: f64,
    raan: f64,
    arg_periapsis: f64,
}

impl Orientation {
    fn of(elements: &OrbitalElements) -> Self {
        Self {
            inclination: elements.inclination * DEG_TO_RAD,
            raan: elements.raan * DEG_TO_RAD,
            arg_periapsis: elements.arg_periapsis * DEG_TO_RAD,
        }
    }

    fn point_at(&self, elements: &OrbitalElements, theta: f64) -> DVec3 {
        let r = radius(elements.semi_major_axis, elements.eccentricity, theta);
        let in_plane = DVec3::new(r * theta.cos(), r * theta.sin(), 0.0);
        orient(in_plane, self.inclination, self.raan, self.arg_periapsis)
    }
}

/// Sample the full ellipse described by `elements`.
///
/// Theta starts at 0 and is accumulated in `PATH_SAMPLE_STEP` increments
/// while it stays ≤ 2π, so every orbit yields `PATH_SAMPLE_COUNT` points
/// regardless of size, shape or orientation. The path is open: the last
/// point stops just short of the first, and consumers close the loop.
pub fn orbit_path(elements: &OrbitalElements) -> Vec<DVec3> {
    let orientation = Orientation::of(elements);
    let mut points = Vec::with_capacity(PATH_SAMPLE_COUNT);

    let mut theta = 0.0_f64;
    while theta <= std::f64::consts::TAU {
        points.push(orientation.point_at(elements, theta));
        theta += PATH_SAMPLE_STEP;
    }

    points
}

/// Position of the satellite at its current true anomaly.
///
/// Pure and deterministic. The anomaly is never range-reduced; sine and
/// cosine periodicity keeps large values correct.
pub fn propagate(elements: &OrbitalElements) -> DVec3 {
    Orientation::of(elements).point_at(elements, elements.true_anomaly_rad())
}
