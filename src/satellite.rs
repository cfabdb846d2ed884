//! Satellite entity: identity, display attributes, elements and derived geometry.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::orbit::{OrbitalElements, orbit_path, propagate};
use crate::types::SatelliteId;

/// Default angular speed in degrees of true anomaly per tick.
pub const DEFAULT_SPEED: f64 = 0.01;

/// Speed range exposed by the parameter panel (degrees per tick).
pub const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.001..=0.1;

/// Default satellite color (`#ff0000`).
pub const DEFAULT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Visual entities owned by the rendering side for one satellite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualHandles {
    /// Point marker that follows the satellite position
    pub marker: Entity,
    /// Polyline tracing the orbit path
    pub path: Entity,
}

/// Everything needed to create a satellite.
#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteParams {
    pub name: String,
    pub color: Color,
    /// Degrees of true anomaly advanced per tick
    pub speed: f64,
    pub elements: OrbitalElements,
}

impl Default for SatelliteParams {
    fn default() -> Self {
        Self {
            name: "Satellite 1".to_string(),
            color: DEFAULT_COLOR,
            speed: DEFAULT_SPEED,
            elements: OrbitalElements::default(),
        }
    }
}

impl SatelliteParams {
    pub fn new(name: impl Into<String>, elements: OrbitalElements) -> Self {
        Self {
            name: name.into(),
            elements,
            ..default()
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Parse a `#rrggbb` (or `rrggbb`, `#rgb`, `#rrggbbaa`) color string.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    Srgba::hex(hex).ok().map(Color::from)
}

/// A live satellite.
///
/// `path` always reflects the current orbit-shaping elements; `position` is
/// the last propagated point at the current true anomaly.
#[derive(Clone, Debug)]
pub struct Satellite {
    id: SatelliteId,
    pub name: String,
    pub color: Color,
    pub speed: f64,
    pub elements: OrbitalElements,
    pub(crate) path: Vec<DVec3>,
    pub(crate) position: DVec3,
    pub(crate) visuals: Option<VisualHandles>,
}

impl Satellite {
    /// Build a satellite with freshly solved geometry.
    pub(crate) fn new(id: SatelliteId, params: SatelliteParams) -> Self {
        let path = orbit_path(&params.elements);
        let position = propagate(&params.elements);
        Self {
            id,
            name: params.name,
            color: params.color,
            speed: params.speed,
            elements: params.elements,
            path,
            position,
            visuals: None,
        }
    }

    pub fn id(&self) -> SatelliteId {
        self.id
    }

    /// Sampled orbit path (open; consumers close the loop).
    pub fn path(&self) -> &[DVec3] {
        &self.path
    }

    /// Last propagated position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn visuals(&self) -> Option<VisualHandles> {
        self.visuals
    }

    /// Re-solve the orbit path from the current elements.
    pub(crate) fn regenerate_path(&mut self) {
        self.path = orbit_path(&self.elements);
    }

    /// Recompute `position` from the current elements.
    pub(crate) fn repropagate(&mut self) {
        self.position = propagate(&self.elements);
    }

    /// One animation step: advance the true anomaly by `speed` and propagate.
    pub fn advance(&mut self) {
        self.elements.true_anomaly += self.speed;
        self.repropagate();
    }
}
