//! Satellite Orbits - headless demo
//!
//! Adds a few satellites, animates them for a fixed number of frames,
//! stops the scheduler and reports where everything ended up.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use satellite_orbits::SatelliteOrbitsPlugin;
use satellite_orbits::binding::{AddSatellite, AnimationControl};
use satellite_orbits::orbit::OrbitalElements;
use satellite_orbits::registry::SatelliteRegistry;
use satellite_orbits::satellite::SatelliteParams;
use satellite_orbits::scheduler::AnimationScheduler;
use satellite_orbits::settings::OrbitSettings;

/// Frames to animate before stopping.
const DEMO_FRAMES: u32 = 600;

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin::default(),
        ))
        // Insert settings before the plugin that reads them
        .insert_resource(OrbitSettings::default())
        .add_plugins(SatelliteOrbitsPlugin)
        .add_systems(Startup, add_demo_satellites)
        .add_systems(Update, (stop_after_demo, report_and_exit))
        .run();
}

fn add_demo_satellites(mut adds: MessageWriter<AddSatellite>) {
    adds.write(AddSatellite::FromPanel);
    adds.write(AddSatellite::With(
        SatelliteParams::new(
            "Molniya",
            OrbitalElements::elliptical(26.0, 0.74).with_orientation(63.4, 40.0, 270.0),
        )
        .with_speed(0.05)
        .with_color(Color::srgb(0.0, 1.0, 0.0)),
    ));
    adds.write(AddSatellite::With(
        SatelliteParams::new(
            "Polar",
            OrbitalElements::circular(8.0).with_orientation(90.0, 0.0, 0.0),
        )
        .with_speed(0.08)
        .with_color(Color::srgb(0.2, 0.4, 1.0)),
    ));
}

fn stop_after_demo(mut frames: Local<u32>, mut controls: MessageWriter<AnimationControl>) {
    *frames += 1;
    if *frames == DEMO_FRAMES {
        controls.write(AnimationControl::Stop);
    }
}

fn report_and_exit(
    scheduler: Res<AnimationScheduler>,
    registry: Res<SatelliteRegistry>,
    mut exit: MessageWriter<AppExit>,
) {
    if scheduler.is_running() {
        return;
    }

    for satellite in registry.iter() {
        let p = satellite.position();
        info!(
            "{} at true anomaly {:.2}°: ({:.3}, {:.3}, {:.3})",
            satellite.name, satellite.elements.true_anomaly, p.x, p.y, p.z
        );
    }
    exit.write(AppExit::Success);
}
