//! Third-person camera that trails the active vehicle.

use bevy::prelude::*;

use crate::fleet::Fleet;

/// Plugin for the follow camera.
pub struct FollowCameraPlugin;

impl Plugin for FollowCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            follow_camera_system.run_if(resource_exists::<Fleet>),
        );
    }
}

/// Marker and settings for the camera that follows the active vehicle.
#[derive(Component, Clone)]
pub struct FollowCamera {
    /// Distance behind the vehicle (m).
    pub distance: f32,
    /// Height above the vehicle (m).
    pub height: f32,
    /// How quickly the camera closes the gap (1/s).
    pub stiffness: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            distance: 25.0,
            height: 12.0,
            stiffness: 4.0,
        }
    }
}

fn spawn_camera(mut commands: Commands) {
    let config = FollowCamera::default();
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-config.distance, config.height, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
        config,
    ));
}

/// Ease the camera toward a point behind and above the active vehicle.
fn follow_camera_system(
    time: Res<Time>,
    fleet: Res<Fleet>,
    camera: Single<(&mut Transform, &FollowCamera)>,
) {
    let Some(vehicle) = fleet.active() else {
        return;
    };
    let (mut transform, config) = camera.into_inner();

    let state = vehicle.state();
    let target = Vec3::new(state.x as f32, 0.0, state.z as f32);
    let heading = (state.rotation as f32).to_radians();
    let forward = Vec3::new(heading.cos(), 0.0, heading.sin());
    let desired = target - forward * config.distance + Vec3::Y * config.height;

    let blend = (time.delta_secs() * config.stiffness).min(1.0);
    transform.translation = transform.translation.lerp(desired, blend);
    transform.look_at(target + Vec3::Y * 2.0, Vec3::Y);
}
