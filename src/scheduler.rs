//! Animation scheduler: the per-frame driver that moves every satellite.
//!
//! Each tick spins the central body, then advances every registered
//! satellite's true anomaly by its speed and re-propagates its position.
//! Ticks are driven by the host frame loop (bevy's `Update` schedule) and
//! stop only when told to.

use bevy::prelude::*;

use crate::binding::AnimationControl;
use crate::registry::SatelliteRegistry;
use crate::settings::OrbitSettings;
use crate::types::{CENTRAL_BODY_SPIN_PER_TICK, OrbitSystemSet};

/// Plugin providing the animation tick.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        let scheduler = app
            .world()
            .get_resource::<OrbitSettings>()
            .map(AnimationScheduler::from_settings)
            .unwrap_or_default();

        app.insert_resource(scheduler)
            .add_systems(
                Update,
                handle_animation_control.in_set(OrbitSystemSet::Edit),
            )
            .add_systems(Update, advance_satellites.in_set(OrbitSystemSet::Animate));
    }
}

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulerState {
    /// Ticks advance the simulation.
    #[default]
    Running,
    /// Ticks are ignored until resumed.
    Stopped,
}

/// Per-frame animation driver.
#[derive(Resource, Clone, Debug)]
pub struct AnimationScheduler {
    state: SchedulerState,
    /// Central body spin added each tick (radians)
    spin_per_tick: f64,
    /// Accumulated central body spin about its own axis (radians)
    central_body_spin: f64,
    ticks: u64,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(CENTRAL_BODY_SPIN_PER_TICK)
    }
}

impl AnimationScheduler {
    /// Running scheduler with the given central body spin rate.
    pub fn new(spin_per_tick: f64) -> Self {
        Self {
            state: SchedulerState::Running,
            spin_per_tick,
            central_body_spin: 0.0,
            ticks: 0,
        }
    }

    pub fn from_settings(settings: &OrbitSettings) -> Self {
        let mut scheduler = Self::new(settings.central_body_spin_per_tick);
        if !settings.start_running {
            scheduler.state = SchedulerState::Stopped;
        }
        scheduler
    }

    /// Run one tick against the registry.
    ///
    /// Returns `false` without touching anything when stopped. A satellite
    /// whose elements produce NaN keeps producing NaN; the others are
    /// unaffected.
    pub fn tick(&mut self, registry: &mut SatelliteRegistry) -> bool {
        if self.state == SchedulerState::Stopped {
            return false;
        }

        self.central_body_spin += self.spin_per_tick;

        for satellite in registry.iter_mut() {
            satellite.advance();
        }

        self.ticks += 1;
        true
    }

    /// Cancel animation. Subsequent ticks are no-ops.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Running {
            info!("Animation stopped after {} ticks", self.ticks);
        }
        self.state = SchedulerState::Stopped;
    }

    pub fn resume(&mut self) {
        if self.state == SchedulerState::Stopped {
            info!("Animation resumed at tick {}", self.ticks);
        }
        self.state = SchedulerState::Running;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Number of ticks that did work.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn central_body_spin(&self) -> f64 {
        self.central_body_spin
    }
}

/// Apply stop/resume requests in send order, before the tick of the same frame.
fn handle_animation_control(
    mut scheduler: ResMut<AnimationScheduler>,
    mut controls: MessageReader<AnimationControl>,
) {
    for control in controls.read() {
        match control {
            AnimationControl::Stop => scheduler.stop(),
            AnimationControl::Resume => scheduler.resume(),
        }
    }
}

/// Advance every satellite once per frame.
fn advance_satellites(
    mut scheduler: ResMut<AnimationScheduler>,
    mut registry: ResMut<SatelliteRegistry>,
) {
    scheduler.tick(&mut registry);
}
