//! Shared identifiers, system sets, and constants for the orbit simulation.

use std::fmt;

use bevy::prelude::*;

/// System set ordering the per-frame work.
///
/// Edits must land before the animation tick so that a change made between
/// two frames is visible to the very next tick, and the render mirror runs
/// last so it always sees the freshly propagated positions.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrbitSystemSet {
    /// Parameter edits and add/delete actions
    Edit,
    /// Scheduler tick (anomaly advance + propagation)
    Animate,
    /// Mirroring registry state into visual entities
    Render,
}

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Angular step (radians) between consecutive orbit path samples.
pub const PATH_SAMPLE_STEP: f64 = 0.05;

/// Number of points every orbit path contains: theta in [0, 2π] at `PATH_SAMPLE_STEP`.
pub const PATH_SAMPLE_COUNT: usize = 126;

/// Central body spin added per animation tick (radians).
pub const CENTRAL_BODY_SPIN_PER_TICK: f64 = 0.002;

/// Fixed axial tilt of the central body visual about Z (radians).
pub const CENTRAL_BODY_TILT: f32 = 0.41;

/// Stable identity of a satellite within a registry.
///
/// Ids are handed out monotonically and never reused, so an id held after
/// deletion simply stops resolving instead of aliasing a newer satellite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SatelliteId(pub u64);

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sat#{}", self.0)
    }
}
