//! Per-shape secondary motion driven by a vehicle's kinematic state.
//!
//! Spin and accumulated rotations are wrapped back inside ±360° by whole
//! turns after every update. They are never reset, so a wheel keeps its
//! phase and direction across the wrap.

use crate::{config::Handling, kinematics::KinematicState, shape::Shape};

/// Rotor spin and blade rate at zero input (degrees per frame).
const ROTOR_BASE_RATE: f64 = 10.0;

/// Wheel spin per frame per m/s.
const ROLLING_SPIN_PER_MPS: f64 = 2.0;

/// Wrap an accumulating angle back into `[-360, 360]` by whole turns.
pub fn wrap_accumulated(mut degrees: f64) -> f64 {
    while degrees > 360.0 {
        degrees -= 360.0;
    }
    while degrees < -360.0 {
        degrees += 360.0;
    }
    degrees
}

/// Mapping from kinematic state to shape rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animation {
    /// Wheels roll with speed; steerable parts sit at their base angle plus
    /// the current steering.
    Rolling,
    /// Tail rotor speeds up with steering; main blades speed up with speed.
    Rotor,
}

impl Animation {
    /// Update one shape's rotation fields for this frame.
    ///
    /// Shapes without the relevant capability are left untouched.
    pub fn animate(self, shape: &mut Shape, state: &KinematicState, handling: &Handling) {
        match self {
            Animation::Rolling => {
                if shape.can_spin() {
                    let spin = shape.spin_rotation() + ROLLING_SPIN_PER_MPS * state.speed;
                    shape.set_spin_rotation(wrap_accumulated(spin));
                }
                if shape.can_steer() {
                    shape.set_rotation(shape.original_rotation() + state.steering);
                }
            }
            Animation::Rotor => {
                let speed_rate = handling.speed_rate(state.speed);
                let steering_rate = handling.steering_rate(state.steering);
                if shape.can_spin() {
                    let spin = shape.spin_rotation() + ROTOR_BASE_RATE * (1.0 + steering_rate);
                    shape.set_spin_rotation(wrap_accumulated(spin));
                }
                if shape.can_steer() {
                    let rotation =
                        shape.rotation() + ROTOR_BASE_RATE * (1.0 + 2.0 * speed_rate.abs());
                    shape.set_rotation(wrap_accumulated(rotation));
                }
            }
        }
    }
}
