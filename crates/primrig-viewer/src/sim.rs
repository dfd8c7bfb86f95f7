//! Fixed-step headless driving loop.
//!
//! Runs the same per-frame sequence as the viewer (integrate toward a fixed
//! intent, then draw) against a recording canvas, and reports how the
//! vehicle behaved.

use primrig::{
    MatrixStack, Vehicle,
    telemetry::{TelemetryOutput, TelemetrySnapshot, emit_telemetry_to, reset_telemetry_to},
};

/// Inputs of one simulation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Simulated seconds to run for.
    pub duration: f64,
    /// Fixed timestep (s).
    pub dt: f64,
    /// Speed the driver asks for (m/s).
    pub target_speed: f64,
    /// Steering the driver asks for (degrees).
    pub target_steering: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            dt: 1.0 / 60.0,
            target_speed: 5.0,
            target_steering: 10.0,
        }
    }
}

impl SimConfig {
    /// Number of whole frames that fit in the duration.
    pub fn frames(&self) -> usize {
        if self.dt > 0.0 && self.duration > 0.0 {
            (self.duration / self.dt).round() as usize
        } else {
            0
        }
    }
}

/// What a run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub frames: usize,
    /// Frames whose draw left the transform stack unbalanced.
    pub unbalanced_frames: usize,
    pub draw_calls: usize,
    pub final_x: f64,
    pub final_z: f64,
    pub final_heading: f64,
    pub final_speed: f64,
    pub final_steering: f64,
    /// Largest distance from the origin reached (m).
    pub max_range: f64,
    /// Total heading change, unwrapped (degrees).
    pub total_turn: f64,
}

/// Drive `vehicle` for `config.frames()` frames.
pub fn run(
    vehicle: &mut dyn Vehicle,
    config: &SimConfig,
    mut telemetry: Option<&mut dyn TelemetryOutput>,
) -> Summary {
    let mut canvas = MatrixStack::new();
    let mut summary = Summary::default();

    if let Some(output) = telemetry.as_deref_mut() {
        reset_telemetry_to(output);
    }

    let mut heading = vehicle.state().rotation;
    for frame in 0..config.frames() {
        vehicle.integrate_toward(config.target_speed, config.target_steering, config.dt);
        vehicle.draw(&mut canvas);

        if canvas.depth() != 0 {
            tracing::error!(frame, depth = canvas.depth(), "transform stack unbalanced");
            summary.unbalanced_frames += 1;
            canvas = MatrixStack::new();
        }
        summary.draw_calls += canvas.take_calls().len();

        let state = *vehicle.state();
        let mut turn = state.rotation - heading;
        if turn > 180.0 {
            turn -= 360.0;
        } else if turn < -180.0 {
            turn += 360.0;
        }
        summary.total_turn += turn;
        heading = state.rotation;
        summary.max_range = summary.max_range.max(state.x.hypot(state.z));

        if let Some(output) = telemetry.as_deref_mut() {
            let snapshot = TelemetrySnapshot {
                elapsed: (frame + 1) as f64 * config.dt,
                dt: config.dt,
                target_speed: config.target_speed,
                target_steering: config.target_steering,
                state,
                handling: vehicle.body().handling,
            };
            emit_telemetry_to(&snapshot, output);
        }
        summary.frames += 1;
    }

    let state = vehicle.state();
    summary.final_x = state.x;
    summary.final_z = state.z;
    summary.final_heading = state.rotation;
    summary.final_speed = state.speed;
    summary.final_steering = state.steering;
    summary
}
