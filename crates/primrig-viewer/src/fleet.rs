//! The vehicles on screen and the systems that drive them.
//!
//! One vehicle at a time takes keyboard input; the rest coast toward zero
//! speed and steering. Every frame each vehicle is integrated, then drawn
//! into a shared recording canvas whose calls are rendered as gizmos.

use bevy::prelude::*;
use primrig::{KinematicState, MatrixStack, Vehicle, VehicleModel};
use primrig_viewer::roster::{build_vehicle, load_handling};

use crate::{gizmo_canvas, launch_params::LaunchParams};

/// Spacing between vehicles at spawn (m).
const SPAWN_SPACING: f64 = 20.0;

/// Climb rate for vehicles with lift (m/s).
const CLIMB_RATE: f64 = 4.0;

/// Longest frame the integrator is given (s).
const MAX_FRAME_DT: f64 = 0.1;

/// Plugin with the fleet's per-frame systems. The [`Fleet`] resource is
/// inserted by the caller.
pub struct FleetPlugin;

impl Plugin for FleetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (drive_input_system, step_fleet_system, draw_fleet_system)
                .chain()
                .run_if(resource_exists::<Fleet>),
        );
    }
}

/// Speed and steering the driver is asking for.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveIntent {
    pub speed: f64,
    pub steering: f64,
    /// Climb per second (m/s).
    pub climb: f64,
}

/// All vehicles in the scene.
#[derive(Resource)]
pub struct Fleet {
    vehicles: Vec<Box<dyn Vehicle>>,
    active: usize,
    intent: DriveIntent,
    canvas: MatrixStack,
}

impl Fleet {
    pub fn new(vehicles: Vec<Box<dyn Vehicle>>) -> Self {
        Self {
            vehicles,
            active: 0,
            intent: DriveIntent::default(),
            canvas: MatrixStack::new(),
        }
    }

    /// The vehicle taking input, if any.
    pub fn active(&self) -> Option<&dyn Vehicle> {
        self.vehicles.get(self.active).map(AsRef::as_ref)
    }

    /// Hand control to the next vehicle.
    pub fn cycle(&mut self) {
        if !self.vehicles.is_empty() {
            self.active = (self.active + 1) % self.vehicles.len();
            self.intent = DriveIntent::default();
            if let Some(vehicle) = self.active() {
                tracing::info!(index = self.active, kind = vehicle.kind(), "switched vehicle");
            }
        }
    }

    /// Integrate every vehicle by `dt`.
    pub fn step(&mut self, dt: f64) {
        for (index, vehicle) in self.vehicles.iter_mut().enumerate() {
            let intent = if index == self.active {
                self.intent
            } else {
                DriveIntent::default()
            };
            vehicle.integrate_toward(intent.speed, intent.steering, dt);
            if intent.climb != 0.0 {
                vehicle.climb(intent.climb * dt);
            }
        }
    }

    /// Draw every vehicle and hand back the recorded calls.
    pub fn draw(&mut self) -> Vec<primrig::DrawCall> {
        for vehicle in &mut self.vehicles {
            vehicle.draw(&mut self.canvas);
            if self.canvas.depth() != 0 {
                tracing::error!(
                    kind = vehicle.kind(),
                    depth = self.canvas.depth(),
                    "vehicle left the transform stack unbalanced"
                );
                self.canvas = MatrixStack::new();
            }
        }
        self.canvas.take_calls()
    }
}

/// Build the fleet described by the launch parameters.
pub fn build_fleet(params: &LaunchParams) -> primrig::Result<Fleet> {
    let handling = load_handling(params.handling.as_deref())?;
    let model = params
        .model
        .as_deref()
        .map(VehicleModel::load)
        .transpose()?;

    let mut vehicles = Vec::with_capacity(params.vehicles.len());
    for &kind in &params.vehicles {
        let mut vehicle = build_vehicle(kind, model.as_ref(), handling)?;
        let body = vehicle.body_mut();
        body.state = KinematicState::at(0.0, SPAWN_SPACING * vehicles.len() as f64, 0.0);
        body.size = params.size;
        vehicles.push(vehicle);
    }

    tracing::info!(
        vehicles = vehicles.len(),
        "fleet ready - W/S throttle, A/D steer, Space/Shift climb, Tab switch"
    );
    Ok(Fleet::new(vehicles))
}

fn axis(keyboard: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f64 {
    let pressed = |key| if keyboard.pressed(key) { 1.0 } else { 0.0 };
    pressed(positive) - pressed(negative)
}

/// Map the keyboard onto the active vehicle's intent.
fn drive_input_system(keyboard: Res<ButtonInput<KeyCode>>, mut fleet: ResMut<Fleet>) {
    if keyboard.just_pressed(KeyCode::Tab) {
        fleet.cycle();
    }

    let Some(handling) = fleet.active().map(|vehicle| vehicle.body().handling) else {
        return;
    };

    let throttle = axis(&keyboard, KeyCode::KeyW, KeyCode::KeyS);
    let turn = axis(&keyboard, KeyCode::KeyA, KeyCode::KeyD);
    fleet.intent = DriveIntent {
        speed: if throttle >= 0.0 {
            throttle * handling.max_forward_speed
        } else {
            -throttle * handling.max_backward_speed
        },
        steering: if turn >= 0.0 {
            turn * handling.max_left_steering
        } else {
            -turn * handling.max_right_steering
        },
        climb: axis(&keyboard, KeyCode::Space, KeyCode::ShiftLeft) * CLIMB_RATE,
    };
}

fn step_fleet_system(time: Res<Time>, mut fleet: ResMut<Fleet>) {
    fleet.step(time.delta_secs_f64().min(MAX_FRAME_DT));
}

fn draw_fleet_system(mut gizmos: Gizmos, mut fleet: ResMut<Fleet>) {
    let calls = fleet.draw();
    gizmo_canvas::draw_calls(&mut gizmos, &calls);

    let center = fleet.active().map_or(Vec3::ZERO, |vehicle| {
        let state = vehicle.state();
        Vec3::new(state.x as f32, 0.0, state.z as f32)
    });
    gizmo_canvas::draw_ground_grid(&mut gizmos, center, 200.0, 10.0);
}
