//! Parameter binding: the message surface a UI panel drives the simulation with.
//!
//! A panel writes these messages from its widget callbacks; the
//! [`apply_parameter_edits`] system applies them to the registry before the
//! animation tick of the same frame. Failed edits are logged and dropped;
//! they never stop the frame.

use bevy::prelude::*;

use crate::orbit::ElementField;
use crate::registry::SatelliteRegistry;
use crate::satellite::{SPEED_RANGE, SatelliteParams};
use crate::types::{OrbitSystemSet, SatelliteId};

/// Plugin wiring the parameter binding messages.
pub struct BindingPlugin;

impl Plugin for BindingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlPanel>()
            .add_message::<AddSatellite>()
            .add_message::<DeleteSatellite>()
            .add_message::<ElementChanged>()
            .add_message::<SpeedChanged>()
            .add_message::<ColorChanged>()
            .add_message::<NameChanged>()
            .add_message::<AnimationControl>()
            .add_systems(Update, apply_parameter_edits.in_set(OrbitSystemSet::Edit));
    }
}

/// Request to add a satellite.
#[derive(Message, Clone, Debug)]
pub enum AddSatellite {
    /// Use the control panel's current values.
    FromPanel,
    /// Use explicit parameters.
    With(SatelliteParams),
}

/// Request to delete a satellite.
#[derive(Message, Clone, Copy, Debug)]
pub struct DeleteSatellite(pub SatelliteId);

/// An orbital element of one satellite was edited.
#[derive(Message, Clone, Copy, Debug)]
pub struct ElementChanged {
    pub id: SatelliteId,
    pub field: ElementField,
    pub value: f64,
}

/// A satellite's angular speed (degrees per tick) was edited.
#[derive(Message, Clone, Copy, Debug)]
pub struct SpeedChanged {
    pub id: SatelliteId,
    pub speed: f64,
}

/// A satellite's color was edited.
#[derive(Message, Clone, Copy, Debug)]
pub struct ColorChanged {
    pub id: SatelliteId,
    pub color: Color,
}

/// A satellite's display name was edited.
#[derive(Message, Clone, Debug)]
pub struct NameChanged {
    pub id: SatelliteId,
    pub name: String,
}

/// Stop or resume the animation scheduler.
///
/// Requests are applied in the order they were written, so the last one
/// of a frame decides the state.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationControl {
    Stop,
    Resume,
}

/// Clamp a speed to the slider range.
pub fn clamp_speed(speed: f64) -> f64 {
    speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
}

/// Current values of the "add satellite" panel.
///
/// Slider-style setters clamp to the ranges the panel exposes.
#[derive(Resource, Clone, Debug, Default)]
pub struct ControlPanel {
    pub params: SatelliteParams,
}

impl ControlPanel {
    pub fn set_element(&mut self, field: ElementField, value: f64) {
        self.params.elements.set(field, field.clamp(value));
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.params.speed = clamp_speed(speed);
    }

    pub fn set_color(&mut self, color: Color) {
        self.params.color = color;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.params.name = name.into();
    }
}

/// Apply pending edits in a fixed order: adds, field edits, deletes.
///
/// Within one frame this lets a panel add a satellite and edit it in the
/// same batch, and a delete always wins over edits queued alongside it.
/// Element and speed edits are clamped to the slider ranges, like the
/// panel's own setters.
pub fn apply_parameter_edits(
    mut registry: ResMut<SatelliteRegistry>,
    panel: Res<ControlPanel>,
    mut adds: MessageReader<AddSatellite>,
    mut element_edits: MessageReader<ElementChanged>,
    mut speed_edits: MessageReader<SpeedChanged>,
    mut color_edits: MessageReader<ColorChanged>,
    mut name_edits: MessageReader<NameChanged>,
    mut deletes: MessageReader<DeleteSatellite>,
) {
    for add in adds.read() {
        let params = match add {
            AddSatellite::FromPanel => panel.params.clone(),
            AddSatellite::With(params) => params.clone(),
        };
        if let Err(err) = registry.create(params) {
            warn!("Cannot add satellite: {}", err);
        }
    }

    for edit in element_edits.read() {
        let value = edit.field.clamp(edit.value);
        if let Err(err) = registry.set_element(edit.id, edit.field, value) {
            warn!("Ignoring {} edit: {}", edit.field, err);
        }
    }

    for edit in speed_edits.read() {
        if let Err(err) = registry.set_speed(edit.id, clamp_speed(edit.speed)) {
            warn!("Ignoring speed edit: {}", err);
        }
    }

    for edit in color_edits.read() {
        if let Err(err) = registry.recolor(edit.id, edit.color) {
            warn!("Ignoring color edit: {}", err);
        }
    }

    for edit in name_edits.read() {
        if let Err(err) = registry.rename(edit.id, edit.name.clone()) {
            warn!("Ignoring rename: {}", err);
        }
    }

    for DeleteSatellite(id) in deletes.read() {
        if let Err(err) = registry.delete(*id) {
            warn!("Cannot delete satellite: {}", err);
        }
    }
}
