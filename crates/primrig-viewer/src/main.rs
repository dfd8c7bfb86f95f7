//! Wireframe viewer for primrig vehicles.
//!
//! Drive the active vehicle with W/S and A/D, climb with Space and Shift,
//! and press Tab to take control of the next one.

mod camera;
mod fleet;
mod gizmo_canvas;
mod launch_params;

use std::process::ExitCode;

use bevy::prelude::*;
use camera::FollowCameraPlugin;
use fleet::FleetPlugin;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let params = launch_params::parse();
    tracing::info!(?params, "starting viewer");
    let fleet = match fleet::build_fleet(&params) {
        Ok(fleet) => fleet,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let window = Window {
        title: "primrig-viewer".to_string(),
        resolution: (1280, 720).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)))
        .insert_resource(fleet)
        .add_plugins((FleetPlugin, FollowCameraPlugin))
        .run();
    ExitCode::SUCCESS
}
