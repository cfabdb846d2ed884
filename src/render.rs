//! Headless rendering mirror.
//!
//! Keeps one marker entity and one path entity per satellite in sync with
//! the registry, plus a spinning central body. The entities carry plain
//! `Transform`s and point lists; attaching meshes and materials to them is
//! left to whatever renderer the host adds.

use bevy::prelude::*;

use crate::registry::{SatelliteEvent, SatelliteRegistry};
use crate::satellite::{Satellite, VisualHandles};
use crate::scheduler::AnimationScheduler;
use crate::types::{CENTRAL_BODY_TILT, OrbitSystemSet, SatelliteId};

/// Plugin providing the visual mirror of the registry.
pub struct RenderSyncPlugin;

impl Plugin for RenderSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_central_body).add_systems(
            Update,
            (apply_lifecycle_events, sync_marker_positions, spin_central_body)
                .chain()
                .in_set(OrbitSystemSet::Render),
        );
    }
}

/// Marker component for the body every satellite orbits.
#[derive(Component, Default)]
pub struct CentralBody;

/// Point marker following a satellite.
#[derive(Component, Clone, Copy, Debug)]
pub struct SatelliteMarker {
    pub satellite: SatelliteId,
}

/// Polyline tracing a satellite's orbit.
#[derive(Component, Clone, Debug)]
pub struct OrbitPath {
    pub satellite: SatelliteId,
    /// Path points in render space (f32)
    pub points: Vec<Vec3>,
    /// Draw a segment from the last point back to the first.
    pub closed: bool,
}

/// Display color of a marker or path.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct VisualColor(pub Color);

fn render_points(satellite: &Satellite) -> Vec<Vec3> {
    satellite.path().iter().map(|p| p.as_vec3()).collect()
}

/// Central body orientation for a given spin: fixed tilt about Z, spin about Y.
pub fn central_body_rotation(spin: f64) -> Quat {
    Quat::from_rotation_y(spin as f32) * Quat::from_rotation_z(CENTRAL_BODY_TILT)
}

fn spawn_central_body(mut commands: Commands) {
    commands.spawn((
        CentralBody,
        Name::new("Central body"),
        Transform::from_rotation(central_body_rotation(0.0)),
    ));
}

fn spawn_visuals(commands: &mut Commands, satellite: &Satellite) -> VisualHandles {
    let id = satellite.id();
    let marker = commands
        .spawn((
            SatelliteMarker { satellite: id },
            Name::new(satellite.name.clone()),
            VisualColor(satellite.color),
            Transform::from_translation(satellite.position().as_vec3()),
        ))
        .id();
    let path = commands
        .spawn((
            OrbitPath {
                satellite: id,
                points: render_points(satellite),
                closed: true,
            },
            Name::new(format!("{} orbit", satellite.name)),
            VisualColor(satellite.color),
        ))
        .id();
    VisualHandles { marker, path }
}

/// Create, update or dispose visuals for each lifecycle message.
///
/// Visual state is always read from the registry when the message is
/// handled, so a satellite created and edited in the same frame spawns with
/// its final path, and one created and deleted in the same frame never spawns.
fn apply_lifecycle_events(
    mut commands: Commands,
    mut lifecycle: MessageReader<SatelliteEvent>,
    mut registry: ResMut<SatelliteRegistry>,
    mut paths: Query<(&mut OrbitPath, &mut VisualColor, &mut Name)>,
    mut markers: Query<(&mut VisualColor, &mut Name), (With<SatelliteMarker>, Without<OrbitPath>)>,
) {
    for event in lifecycle.read() {
        match *event {
            SatelliteEvent::Created(id) => {
                let Some(satellite) = registry.get(id) else {
                    continue;
                };
                let handles = spawn_visuals(&mut commands, satellite);
                if let Err(err) = registry.attach_visuals(id, handles) {
                    warn!("Could not attach visuals: {}", err);
                }
            }
            SatelliteEvent::PathChanged(id) => {
                let Some(satellite) = registry.get(id) else {
                    continue;
                };
                if let Some(handles) = satellite.visuals()
                    && let Ok((mut path, _, _)) = paths.get_mut(handles.path)
                {
                    path.points = render_points(satellite);
                }
            }
            SatelliteEvent::Recolored(id) => {
                let Some(satellite) = registry.get(id) else {
                    continue;
                };
                let Some(handles) = satellite.visuals() else {
                    continue;
                };
                if let Ok((_, mut color, _)) = paths.get_mut(handles.path) {
                    color.0 = satellite.color;
                }
                if let Ok((mut color, _)) = markers.get_mut(handles.marker) {
                    color.0 = satellite.color;
                }
            }
            SatelliteEvent::Renamed(id) => {
                let Some(satellite) = registry.get(id) else {
                    continue;
                };
                let Some(handles) = satellite.visuals() else {
                    continue;
                };
                if let Ok((_, _, mut name)) = paths.get_mut(handles.path) {
                    name.set(format!("{} orbit", satellite.name));
                }
                if let Ok((_, mut name)) = markers.get_mut(handles.marker) {
                    name.set(satellite.name.clone());
                }
            }
            SatelliteEvent::Deleted { id, visuals } => {
                if let Some(handles) = visuals {
                    commands.entity(handles.marker).despawn();
                    commands.entity(handles.path).despawn();
                    debug!("Released visuals for {}", id);
                }
            }
        }
    }
}

/// Copy each satellite's latest position into its marker transform.
fn sync_marker_positions(
    registry: Res<SatelliteRegistry>,
    mut markers: Query<&mut Transform, With<SatelliteMarker>>,
) {
    for satellite in registry.iter() {
        let Some(handles) = satellite.visuals() else {
            continue;
        };
        if let Ok(mut transform) = markers.get_mut(handles.marker) {
            transform.translation = satellite.position().as_vec3();
        }
    }
}

fn spin_central_body(
    scheduler: Res<AnimationScheduler>,
    mut bodies: Query<&mut Transform, With<CentralBody>>,
) {
    let rotation = central_body_rotation(scheduler.central_body_spin());
    for mut transform in bodies.iter_mut() {
        transform.rotation = rotation;
    }
}
