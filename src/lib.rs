//! Satellite Orbits - Keplerian orbit visualizer core
//!
//! Solves orbit paths from classical orbital elements, keeps an editable
//! registry of satellites, and animates them by advancing each satellite's
//! true anomaly once per frame.

pub mod binding;
pub mod orbit;
pub mod registry;
pub mod render;
pub mod satellite;
pub mod scheduler;
pub mod settings;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use bevy::prelude::*;

use binding::{BindingPlugin, apply_parameter_edits};
use registry::{SatelliteEvent, SatelliteRegistry, publish_lifecycle_events};
use render::RenderSyncPlugin;
use scheduler::AnimationPlugin;
use settings::OrbitSettings;
use types::OrbitSystemSet;

/// Plugin bundling the registry, parameter binding, animation and render mirror.
///
/// Insert `OrbitSettings` before adding this plugin to override defaults.
pub struct SatelliteOrbitsPlugin;

impl Plugin for SatelliteOrbitsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>();
        let validation = app.world().resource::<OrbitSettings>().validation;

        app.insert_resource(SatelliteRegistry::with_validation(validation))
            .add_message::<SatelliteEvent>()
            .configure_sets(
                Update,
                (
                    OrbitSystemSet::Edit,
                    OrbitSystemSet::Animate,
                    OrbitSystemSet::Render,
                )
                    .chain(),
            )
            .add_plugins((BindingPlugin, AnimationPlugin, RenderSyncPlugin))
            .add_systems(
                Update,
                publish_lifecycle_events
                    .after(apply_parameter_edits)
                    .in_set(OrbitSystemSet::Edit),
            );
    }
}
