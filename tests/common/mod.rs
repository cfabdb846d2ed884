//! Common test utilities for integration tests.

use bevy::prelude::*;
use satellite_orbits::SatelliteOrbitsPlugin;
use satellite_orbits::registry::SatelliteRegistry;
use satellite_orbits::render::{OrbitPath, SatelliteMarker, VisualColor};
use satellite_orbits::settings::OrbitSettings;
use satellite_orbits::types::SatelliteId;

/// Headless app with the orbit plugin and default settings.
pub fn create_app() -> App {
    create_app_with(OrbitSettings::default())
}

/// Headless app with the orbit plugin and the given settings.
pub fn create_app_with(settings: OrbitSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(settings)
        .add_plugins(SatelliteOrbitsPlugin);
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Ids currently in the registry, in presentation order.
pub fn satellite_ids(app: &App) -> Vec<SatelliteId> {
    app.world().resource::<SatelliteRegistry>().ids()
}

/// All marker entities with their satellite, translation and color.
pub fn markers(app: &mut App) -> Vec<(SatelliteId, Vec3, Color)> {
    let mut query = app
        .world_mut()
        .query::<(&SatelliteMarker, &Transform, &VisualColor)>();
    query
        .iter(app.world())
        .map(|(m, t, c)| (m.satellite, t.translation, c.0))
        .collect()
}

/// All path entities with their satellite, point count and color.
pub fn paths(app: &mut App) -> Vec<(SatelliteId, Vec<Vec3>, Color)> {
    let mut query = app.world_mut().query::<(&OrbitPath, &VisualColor)>();
    query
        .iter(app.world())
        .map(|(p, c)| (p.satellite, p.points.clone(), c.0))
        .collect()
}
