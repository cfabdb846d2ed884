//! Runtime configuration resources.
//!
//! Insert these before `SatelliteOrbitsPlugin` to override the defaults;
//! the plugin only initializes what is missing.

use bevy::prelude::*;

use crate::types::CENTRAL_BODY_SPIN_PER_TICK;

/// How strictly the registry checks orbital elements on create and update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementValidation {
    /// Accept anything. Degenerate elements (e >= 1, a <= 0) produce
    /// infinite or NaN coordinates that flow through to consumers.
    #[default]
    Permissive,
    /// Reject elements that do not describe a bounded ellipse.
    Strict,
}

/// Settings for the orbit simulation.
#[derive(Resource, Clone, Debug)]
pub struct OrbitSettings {
    /// Central body spin added per tick (radians).
    pub central_body_spin_per_tick: f64,
    /// Element validation policy applied by the registry.
    pub validation: ElementValidation,
    /// Whether the animation scheduler starts in the running state.
    pub start_running: bool,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            central_body_spin_per_tick: CENTRAL_BODY_SPIN_PER_TICK,
            validation: ElementValidation::Permissive,
            start_running: true,
        }
    }
}

impl OrbitSettings {
    /// Settings that reject degenerate orbits at the registry boundary.
    pub fn strict() -> Self {
        Self {
            validation: ElementValidation::Strict,
            ..default()
        }
    }
}
