//! Satellite registry: the owned, insertion-ordered collection of satellites.
//!
//! All lifecycle operations go through the registry and run to completion
//! before returning. Every mutation that a subscriber may care about is
//! queued as a [`SatelliteEvent`] in a bounded outbox. Inside an `App`,
//! [`publish_lifecycle_events`] forwards the outbox as bevy messages once
//! per frame, so any number of readers (the render mirror, a panel) see
//! every event.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::orbit::{ElementChanges, ElementError, ElementField, OrbitalElements};
use crate::satellite::{Satellite, SatelliteParams, VisualHandles, parse_hex_color};
use crate::settings::ElementValidation;
use crate::types::SatelliteId;

/// Errors returned by registry operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("satellite {0} not found")]
    NotFound(SatelliteId),

    #[error("invalid orbital elements: {source}")]
    InvalidElements {
        #[from]
        source: ElementError,
    },

    #[error("invalid color {0:?}")]
    InvalidColor(String),
}

/// Most lifecycle events kept while nobody drains the outbox.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Lifecycle notifications emitted by the registry.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum SatelliteEvent {
    /// A satellite was added at the end of the collection.
    Created(SatelliteId),
    /// The orbit path was regenerated after an element edit.
    PathChanged(SatelliteId),
    /// Marker and path color changed.
    Recolored(SatelliteId),
    /// Display name changed.
    Renamed(SatelliteId),
    /// The satellite is gone; its visuals (if any) must be released.
    Deleted {
        id: SatelliteId,
        visuals: Option<VisualHandles>,
    },
}

/// Owned collection of satellites keyed by stable id.
#[derive(Resource, Debug, Default)]
pub struct SatelliteRegistry {
    satellites: Vec<Satellite>,
    next_id: u64,
    validation: ElementValidation,
    events: VecDeque<SatelliteEvent>,
}

impl SatelliteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry applying the given element validation policy.
    pub fn with_validation(validation: ElementValidation) -> Self {
        Self {
            validation,
            ..default()
        }
    }

    fn check(&self, elements: &OrbitalElements) -> Result<(), RegistryError> {
        match self.validation {
            ElementValidation::Permissive => Ok(()),
            ElementValidation::Strict => Ok(elements.validate()?),
        }
    }

    /// Queue an event, dropping the oldest once the outbox is full.
    fn emit(&mut self, event: SatelliteEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
            debug!("Lifecycle outbox full, dropped oldest event");
        }
        self.events.push_back(event);
    }

    fn index_of(&self, id: SatelliteId) -> Result<usize, RegistryError> {
        self.satellites
            .iter()
            .position(|s| s.id() == id)
            .ok_or(RegistryError::NotFound(id))
    }

    fn entry_mut(&mut self, id: SatelliteId) -> Result<&mut Satellite, RegistryError> {
        let index = self.index_of(id)?;
        Ok(&mut self.satellites[index])
    }

    /// Add a satellite at the end of the collection.
    ///
    /// Assigns a fresh id and solves the initial orbit path and position.
    pub fn create(&mut self, params: SatelliteParams) -> Result<SatelliteId, RegistryError> {
        self.check(&params.elements)?;

        self.next_id += 1;
        let id = SatelliteId(self.next_id);
        let satellite = Satellite::new(id, params);

        info!(
            "Created {} '{}' (a = {}, e = {})",
            id, satellite.name, satellite.elements.semi_major_axis, satellite.elements.eccentricity
        );

        self.satellites.push(satellite);
        self.emit(SatelliteEvent::Created(id));
        Ok(id)
    }

    /// Merge `changes` into a satellite's elements and regenerate its path.
    ///
    /// Under strict validation the merged set is checked first and the
    /// satellite is left untouched on failure.
    pub fn update(&mut self, id: SatelliteId, changes: ElementChanges) -> Result<(), RegistryError> {
        let index = self.index_of(id)?;
        let merged = changes.merged_into(&self.satellites[index].elements);
        self.check(&merged)?;

        let satellite = &mut self.satellites[index];
        satellite.elements = merged;
        satellite.regenerate_path();
        satellite.repropagate();

        debug!("Regenerated orbit path for {}", id);
        self.emit(SatelliteEvent::PathChanged(id));
        Ok(())
    }

    /// Single-field element edit.
    ///
    /// Orbit-shaping fields regenerate the path; the true anomaly only moves
    /// the satellite along the existing one.
    pub fn set_element(
        &mut self,
        id: SatelliteId,
        field: ElementField,
        value: f64,
    ) -> Result<(), RegistryError> {
        if field.shapes_orbit() {
            return self.update(id, ElementChanges::single(field, value));
        }

        let index = self.index_of(id)?;
        let mut moved = self.satellites[index].elements;
        moved.set(field, value);
        self.check(&moved)?;

        let satellite = &mut self.satellites[index];
        satellite.elements = moved;
        satellite.repropagate();
        Ok(())
    }

    /// Change the angular speed (degrees per tick).
    pub fn set_speed(&mut self, id: SatelliteId, speed: f64) -> Result<(), RegistryError> {
        self.entry_mut(id)?.speed = speed;
        Ok(())
    }

    /// Change the display color of both marker and path. Geometry is kept.
    pub fn recolor(&mut self, id: SatelliteId, color: Color) -> Result<(), RegistryError> {
        self.entry_mut(id)?.color = color;
        self.emit(SatelliteEvent::Recolored(id));
        Ok(())
    }

    /// [`Self::recolor`] from a `#rrggbb` string.
    pub fn recolor_hex(&mut self, id: SatelliteId, hex: &str) -> Result<(), RegistryError> {
        let color = parse_hex_color(hex).ok_or_else(|| RegistryError::InvalidColor(hex.to_string()))?;
        self.recolor(id, color)
    }

    pub fn rename(&mut self, id: SatelliteId, name: impl Into<String>) -> Result<(), RegistryError> {
        self.entry_mut(id)?.name = name.into();
        self.emit(SatelliteEvent::Renamed(id));
        Ok(())
    }

    /// Remove a satellite and ask subscribers to release its visuals.
    pub fn delete(&mut self, id: SatelliteId) -> Result<Satellite, RegistryError> {
        let index = self.index_of(id)?;
        let satellite = self.satellites.remove(index);

        info!("Deleted {} '{}'", id, satellite.name);

        self.emit(SatelliteEvent::Deleted {
            id,
            visuals: satellite.visuals(),
        });
        Ok(satellite)
    }

    /// Record the visual entities created for a satellite.
    pub fn attach_visuals(
        &mut self,
        id: SatelliteId,
        visuals: VisualHandles,
    ) -> Result<(), RegistryError> {
        self.entry_mut(id)?.visuals = Some(visuals);
        Ok(())
    }

    /// Take all queued lifecycle events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SatelliteEvent> {
        self.events.drain(..).collect()
    }

    pub fn get(&self, id: SatelliteId) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: SatelliteId) -> bool {
        self.get(id).is_some()
    }

    /// Presentation index of a satellite.
    pub fn position_of(&self, id: SatelliteId) -> Option<usize> {
        self.index_of(id).ok()
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    /// Satellites in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Satellite> {
        self.satellites.iter_mut()
    }

    pub fn ids(&self) -> Vec<SatelliteId> {
        self.satellites.iter().map(Satellite::id).collect()
    }
}

/// Forward the registry outbox as [`SatelliteEvent`] messages.
///
/// Runs at the end of the edit phase, so readers later in the frame see
/// every event produced by that frame's edits.
pub fn publish_lifecycle_events(
    mut registry: ResMut<SatelliteRegistry>,
    mut lifecycle: MessageWriter<SatelliteEvent>,
) {
    lifecycle.write_batch(registry.drain_events());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::orbit_path;
    use crate::test_utils::fixtures;

    fn registry_with(names: &[&str]) -> (SatelliteRegistry, Vec<SatelliteId>) {
        let mut registry = SatelliteRegistry::new();
        let ids = names
            .iter()
            .map(|name| {
                registry
                    .create(fixtures::satellite(name, OrbitalElements::default(), 0.01))
                    .unwrap()
            })
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_create_appends_and_is_retrievable() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        assert_eq!(registry.len(), 2);

        let id = registry.create(SatelliteParams::default()).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.position_of(id), Some(2));
        assert_eq!(registry.get(id).unwrap().name, "Satellite 1");
        assert_eq!(registry.ids(), vec![ids[0], ids[1], id]);
    }

    #[test]
    fn test_create_emits_event() {
        let (mut registry, ids) = registry_with(&["A"]);
        assert_eq!(registry.drain_events(), vec![SatelliteEvent::Created(ids[0])]);
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        let removed = registry.delete(ids[0]).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(ids[0]));

        assert_eq!(
            registry.delete(ids[0]).unwrap_err(),
            RegistryError::NotFound(ids[0])
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.delete(ids[0]).unwrap();
        let fresh = registry.create(SatelliteParams::default()).unwrap();
        assert_ne!(fresh, ids[0]);
        assert!(registry.get(ids[0]).is_none());
    }

    #[test]
    fn test_delete_preserves_order_of_others() {
        let (mut registry, ids) = registry_with(&["A", "B", "C"]);
        registry.delete(ids[1]).unwrap();
        assert_eq!(registry.ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_update_matches_fresh_solve() {
        let (mut registry, ids) = registry_with(&["A"]);
        let mut changes = ElementChanges::single(ElementField::Eccentricity, 0.4);
        changes.set(ElementField::Inclination, 60.0);
        registry.update(ids[0], changes).unwrap();

        let sat = registry.get(ids[0]).unwrap();
        let expected = changes.merged_into(&OrbitalElements::default());
        assert_eq!(sat.elements, expected);
        assert_eq!(sat.path(), orbit_path(&expected).as_slice());
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let mut registry = SatelliteRegistry::new();
        let missing = SatelliteId(99);
        assert_eq!(
            registry.update(missing, ElementChanges::default()),
            Err(RegistryError::NotFound(missing))
        );
        assert_eq!(
            registry.recolor(missing, Color::WHITE),
            Err(RegistryError::NotFound(missing))
        );
    }

    #[test]
    fn test_true_anomaly_edit_keeps_path() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.drain_events();
        let before = registry.get(ids[0]).unwrap().path().to_vec();

        registry
            .set_element(ids[0], ElementField::TrueAnomaly, 90.0)
            .unwrap();

        let sat = registry.get(ids[0]).unwrap();
        assert_eq!(sat.path(), before.as_slice());
        assert!((sat.position() - bevy::math::DVec3::new(0.0, 10.0, 0.0)).length() < 1e-9);
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn test_shape_edit_emits_path_changed() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.drain_events();
        registry
            .set_element(ids[0], ElementField::SemiMajorAxis, 25.0)
            .unwrap();
        assert_eq!(registry.drain_events(), vec![SatelliteEvent::PathChanged(ids[0])]);
        assert_eq!(registry.get(ids[0]).unwrap().path()[0].x, 25.0);
    }

    #[test]
    fn test_recolor_keeps_geometry() {
        let (mut registry, ids) = registry_with(&["A"]);
        let before = registry.get(ids[0]).unwrap().path().to_vec();
        registry.recolor(ids[0], Color::srgb(0.0, 1.0, 0.0)).unwrap();

        let sat = registry.get(ids[0]).unwrap();
        assert_eq!(sat.color, Color::srgb(0.0, 1.0, 0.0));
        assert_eq!(sat.path(), before.as_slice());
    }

    #[test]
    fn test_recolor_hex_rejects_garbage() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.recolor_hex(ids[0], "#00ff00").unwrap();
        assert_eq!(registry.get(ids[0]).unwrap().color, Color::srgb(0.0, 1.0, 0.0));
        assert_eq!(
            registry.recolor_hex(ids[0], "green"),
            Err(RegistryError::InvalidColor("green".to_string()))
        );
    }

    #[test]
    fn test_strict_validation_rejects_and_leaves_state() {
        let mut registry = SatelliteRegistry::with_validation(ElementValidation::Strict);
        let bad = fixtures::satellite("bad", OrbitalElements::elliptical(10.0, 1.2), 0.01);
        assert!(matches!(
            registry.create(bad),
            Err(RegistryError::InvalidElements {
                source: ElementError::NonEllipticalEccentricity(_)
            })
        ));
        assert!(registry.is_empty());

        let id = registry.create(SatelliteParams::default()).unwrap();
        let result = registry.set_element(id, ElementField::SemiMajorAxis, -1.0);
        assert!(matches!(result, Err(RegistryError::InvalidElements { .. })));
        assert_eq!(registry.get(id).unwrap().elements.semi_major_axis, 10.0);
    }

    #[test]
    fn test_strict_validation_covers_true_anomaly_edit() {
        let mut registry = SatelliteRegistry::with_validation(ElementValidation::Strict);
        let id = registry.create(SatelliteParams::default()).unwrap();
        let before = registry.get(id).unwrap().position();

        let result = registry.set_element(id, ElementField::TrueAnomaly, f64::NAN);
        assert!(matches!(
            result,
            Err(RegistryError::InvalidElements {
                source: ElementError::NonFinite { .. }
            })
        ));

        let sat = registry.get(id).unwrap();
        assert_eq!(sat.elements.true_anomaly, 0.0);
        assert_eq!(sat.position(), before);
    }

    #[test]
    fn test_undrained_outbox_is_bounded() {
        let (mut registry, ids) = registry_with(&["A"]);
        for k in 0..10_000 {
            registry
                .set_element(ids[0], ElementField::Raan, k as f64)
                .unwrap();
        }

        let events = registry.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.last(), Some(&SatelliteEvent::PathChanged(ids[0])));
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn test_permissive_accepts_degenerate_orbit() {
        let mut registry = SatelliteRegistry::new();
        let id = registry
            .create(fixtures::satellite("e=1", OrbitalElements::elliptical(10.0, 1.0), 0.01))
            .unwrap();
        // a(1 − e²) = 0 collapses the whole path onto the focus
        let sat = registry.get(id).unwrap();
        assert_eq!(sat.path().len(), crate::types::PATH_SAMPLE_COUNT);
        assert!(sat.path().iter().all(|p| p.length() == 0.0));
    }

    #[test]
    fn test_delete_reports_visuals() {
        let (mut registry, ids) = registry_with(&["A"]);
        let mut world = World::new();
        let handles = VisualHandles {
            marker: world.spawn_empty().id(),
            path: world.spawn_empty().id(),
        };
        registry.attach_visuals(ids[0], handles).unwrap();
        registry.drain_events();

        registry.delete(ids[0]).unwrap();
        assert_eq!(
            registry.drain_events(),
            vec![SatelliteEvent::Deleted {
                id: ids[0],
                visuals: Some(handles),
            }]
        );
    }
}
