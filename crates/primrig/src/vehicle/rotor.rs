//! Rotor-lifted VTOL craft.
//!
//! The layout is authored at unit scale and built ten times larger.

use glam::DVec3;

use super::{Vehicle, VehicleBody};
use crate::{
    animation::Animation,
    canvas::{Canvas, TransformScope},
    config::Handling,
    kinematics::HeadingRule,
    parts::{Livery, PartRole, PartSpec, assemble},
    shape::{Capabilities, Rgb, Solid},
};

/// Scale applied to [`PARTS`] at construction.
const MODEL_SCALE: f64 = 10.0;

/// Yaw rate per degree of steering, independent of speed.
const TURN_GAIN: f64 = 20.0;

/// Nose-down pitch at full forward speed (degrees).
const FULL_SPEED_PITCH: f64 = 30.0;

/// Bank at full speed and full steering lock (degrees).
const FULL_LOCK_BANK: f64 = 15.0;

const fn trap(a: f64, b: f64, height: f64, offset: f64, depth: f64) -> Solid {
    Solid::TrapPrism {
        a,
        b,
        height,
        offset,
        depth,
    }
}

const fn block(x_len: f64, y_len: f64, z_len: f64) -> Solid {
    Solid::RectPrism {
        x_len,
        y_len,
        z_len,
    }
}

const fn disc(radius: f64, depth: f64) -> Solid {
    Solid::Cylinder { radius, depth }
}

const PARTS: &[PartSpec] = &[
    // Fuselage.
    PartSpec::new(
        "keel",
        PartRole::Body,
        trap(2.0, 2.8, 0.2, -0.7, 0.5),
        DVec3::new(0.2, 0.2, 0.0),
    ),
    PartSpec::new(
        "mid",
        PartRole::Body,
        trap(2.4, 1.2, 0.3, 0.6, 0.4),
        DVec3::new(-0.1, 0.4, 0.0),
    ),
    PartSpec::new(
        "canopy",
        PartRole::Body,
        trap(1.0, 0.45, 0.1, 0.5, 0.2),
        DVec3::new(-0.1, 0.7, 0.0),
    ),
    PartSpec::new(
        "tail_boom",
        PartRole::Body,
        trap(0.4, 1.3, 0.1, -0.6, 0.15),
        DVec3::new(-1.5, 0.4, 0.0),
    ),
    PartSpec::new(
        "fin",
        PartRole::Body,
        trap(0.3, 0.25, 0.55, -0.4, 0.1),
        DVec3::new(-2.05, 0.5, 0.0),
    ),
    // Rotors.
    PartSpec::new(
        "tail_rotor",
        PartRole::Rotor,
        disc(0.3, 0.02),
        DVec3::new(-2.3, 0.6, -0.075),
    )
    .with(Capabilities::SPIN),
    PartSpec::new(
        "shaft",
        PartRole::Strut,
        block(0.1, 0.1, 0.1),
        DVec3::new(0.0, 0.8, 0.0),
    ),
    PartSpec::new(
        "blade_a",
        PartRole::Rotor,
        block(3.6, 0.03, 0.2),
        DVec3::new(0.0, 0.9, 0.0),
    )
    .rotated(45.0)
    .with(Capabilities::STEER),
    PartSpec::new(
        "blade_b",
        PartRole::Rotor,
        block(0.2, 0.03, 3.6),
        DVec3::new(0.0, 0.9, 0.0),
    )
    .rotated(45.0)
    .with(Capabilities::STEER),
    PartSpec::new(
        "hub",
        PartRole::Strut,
        block(0.05, 0.05, 0.05),
        DVec3::new(0.0, 0.93, 0.0),
    ),
    // Landing gear.
    PartSpec::new(
        "left_wheel",
        PartRole::Wheel,
        disc(0.08, 0.1),
        DVec3::new(0.3, 0.0, -0.2),
    ),
    PartSpec::new(
        "right_wheel",
        PartRole::Wheel,
        disc(0.08, 0.1),
        DVec3::new(0.3, 0.0, 0.2),
    ),
    PartSpec::new(
        "left_strut",
        PartRole::Strut,
        trap(0.04, 0.3, 0.15, 0.0, 0.04),
        DVec3::new(0.3, 0.05, -0.13),
    ),
    PartSpec::new(
        "right_strut",
        PartRole::Strut,
        trap(0.04, 0.3, 0.15, 0.0, 0.04),
        DVec3::new(0.3, 0.05, 0.13),
    ),
    PartSpec::new(
        "tail_wheel_left",
        PartRole::Wheel,
        disc(0.06, 0.05),
        DVec3::new(-1.1, 0.0, -0.04),
    ),
    PartSpec::new(
        "tail_wheel_right",
        PartRole::Wheel,
        disc(0.06, 0.05),
        DVec3::new(-1.1, 0.0, 0.04),
    ),
    PartSpec::new(
        "tail_strut",
        PartRole::Strut,
        trap(0.1, 0.15, 0.2, 0.14, 0.03),
        DVec3::new(-1.1, 0.08, 0.0),
    ),
    // Wings and stores.
    PartSpec::new(
        "tailplane",
        PartRole::Wing,
        Solid::TriPrism {
            a: 0.2,
            b: 0.3,
            angle: 10.0,
            depth: 0.6,
        },
        DVec3::new(-2.0, 0.42, 0.0),
    ),
    PartSpec::new(
        "wings",
        PartRole::Wing,
        trap(0.65, 0.2, 0.11, 0.4, 2.0),
        DVec3::new(0.0, 0.35, 0.0),
    ),
    PartSpec::new(
        "left_inner_pylon",
        PartRole::Pylon,
        block(0.3, 0.05, 0.05),
        DVec3::new(0.0, 0.3, -0.45),
    ),
    PartSpec::new(
        "left_outer_pylon",
        PartRole::Pylon,
        block(0.3, 0.05, 0.05),
        DVec3::new(0.0, 0.3, -0.7),
    ),
    PartSpec::new(
        "left_inner_pod",
        PartRole::Pod,
        trap(0.5, 0.8, 0.1, -0.3, 0.12),
        DVec3::new(0.1, 0.2, -0.45),
    ),
    PartSpec::new(
        "left_outer_pod",
        PartRole::Pod,
        trap(0.5, 0.8, 0.1, -0.3, 0.12),
        DVec3::new(0.1, 0.2, -0.7),
    ),
    PartSpec::new(
        "right_inner_pylon",
        PartRole::Pylon,
        block(0.3, 0.05, 0.05),
        DVec3::new(0.0, 0.3, 0.45),
    ),
    PartSpec::new(
        "right_outer_pylon",
        PartRole::Pylon,
        block(0.3, 0.05, 0.05),
        DVec3::new(0.0, 0.3, 0.7),
    ),
    PartSpec::new(
        "right_inner_pod",
        PartRole::Pod,
        trap(0.5, 0.8, 0.1, -0.3, 0.12),
        DVec3::new(0.1, 0.2, 0.45),
    ),
    PartSpec::new(
        "right_outer_pod",
        PartRole::Pod,
        trap(0.5, 0.8, 0.1, -0.3, 0.12),
        DVec3::new(0.1, 0.2, 0.7),
    ),
];

fn livery() -> Livery {
    Livery::new()
        .role(PartRole::Body, Rgb::grey(0.6))
        .part("mid", Rgb::grey(0.2))
        .role(PartRole::Rotor, Rgb::grey(0.4))
        .role(PartRole::Wheel, Rgb::grey(0.05))
        .role(PartRole::Strut, Rgb::grey(0.1))
        .role(PartRole::Wing, Rgb::grey(0.8))
        .role(PartRole::Pylon, Rgb::grey(0.8))
        .role(PartRole::Pod, Rgb::grey(0.2))
}

/// A helicopter-style craft that yaws on the spot and tilts into its motion.
#[derive(Clone, Debug, PartialEq)]
pub struct Rotorcraft {
    body: VehicleBody,
    altitude: f64,
}

impl Default for Rotorcraft {
    fn default() -> Self {
        Self::new()
    }
}

impl Rotorcraft {
    pub fn new() -> Self {
        Self::with_handling(Handling::default())
    }

    pub fn with_handling(handling: Handling) -> Self {
        let mut body = VehicleBody::new(handling);
        assemble(&mut body.shapes, PARTS, MODEL_SCALE);
        livery().apply(&mut body.shapes);
        tracing::debug!(parts = body.shapes.len(), "built rotorcraft");
        Self {
            body,
            altitude: 0.0,
        }
    }

    /// Height above the ground plane (m).
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Set the height above the ground plane; negative values clamp to 0.
    pub fn set_altitude(&mut self, altitude: f64) {
        self.altitude = altitude.max(0.0);
    }
}

impl Vehicle for Rotorcraft {
    fn kind(&self) -> &'static str {
        "rotor"
    }

    fn body(&self) -> &VehicleBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut VehicleBody {
        &mut self.body
    }

    fn heading_rule(&self) -> HeadingRule {
        HeadingRule::SteeringOnly { gain: TURN_GAIN }
    }

    fn climb(&mut self, delta: f64) {
        self.set_altitude(self.altitude + delta);
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        let handling = &self.body.handling;
        let speed_rate = handling.speed_rate(self.body.state.speed);
        let steering_rate = handling.steering_rate(self.body.state.steering);

        let mut scope = TransformScope::new(canvas);
        self.body.place(&mut *scope);
        scope.translate(DVec3::new(0.0, self.altitude, 0.0));
        scope.scale(DVec3::splat(self.body.size));
        scope.rotate(-FULL_SPEED_PITCH * speed_rate, DVec3::Z);
        scope.rotate(steering_rate * speed_rate * FULL_LOCK_BANK, DVec3::X);
        self.body.animate_and_draw(Animation::Rotor, &mut *scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{canvas::MatrixStack, kinematics::KinematicState};

    #[test]
    fn test_layout_and_livery() {
        let craft = Rotorcraft::new();
        let shapes = craft.shapes();

        assert_eq!(shapes.len(), 27);
        assert_eq!(shapes.spinning().count(), 1);
        assert_eq!(shapes.steering().count(), 2);

        let color = |label: &str| shapes.find(label).unwrap().shape.color();
        assert_eq!(color("keel"), Rgb::grey(0.6));
        assert_eq!(color("mid"), Rgb::grey(0.2));
        assert_eq!(color("blade_a"), Rgb::grey(0.4));
        assert_eq!(color("tail_wheel_left"), Rgb::grey(0.05));
        assert_eq!(color("hub"), Rgb::grey(0.1));
        assert_eq!(color("left_outer_pylon"), Rgb::grey(0.8));
        assert_eq!(color("right_inner_pod"), Rgb::grey(0.2));
    }

    #[test]
    fn test_built_at_model_scale() {
        let craft = Rotorcraft::new();
        let blade = &craft.shapes().find("blade_a").unwrap().shape;

        assert!((blade.position() - DVec3::new(0.0, 9.0, 0.0)).length() < 1e-9);
        assert_eq!(blade.original_rotation(), 45.0);
    }

    #[test]
    fn test_turns_without_speed() {
        let mut craft = Rotorcraft::new();
        craft.body_mut().state.steering = 15.0;

        craft.integrate(0.1);

        assert!((craft.state().rotation - 30.0).abs() < 1e-9);
        assert_eq!(craft.state().x, 0.0);
    }

    #[test]
    fn test_blades_turn_faster_with_speed() {
        let mut idle = Rotorcraft::new();
        let mut cruising = Rotorcraft::new();
        cruising.body_mut().state = KinematicState {
            speed: 10.0,
            ..KinematicState::default()
        };

        idle.draw(&mut MatrixStack::new());
        cruising.draw(&mut MatrixStack::new());

        let rotation = |craft: &Rotorcraft| craft.shapes().find("blade_a").unwrap().shape.rotation();
        assert!((rotation(&idle) - 55.0).abs() < 1e-9);
        assert!((rotation(&cruising) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_altitude_lifts_and_clamps() {
        let mut craft = Rotorcraft::new();
        craft.climb(5.0);
        let mut canvas = MatrixStack::new();

        craft.draw(&mut canvas);

        // The keel sits 2 m up in the model; the craft adds 5 m on top.
        let keel = canvas.calls()[0].transform.transform_point3(DVec3::ZERO);
        assert!((keel.y - 7.0).abs() < 1e-9);
        assert_eq!(canvas.depth(), 0);

        craft.climb(-50.0);
        assert_eq!(craft.altitude(), 0.0);
    }

    #[test]
    fn test_pitches_nose_down_at_speed() {
        let mut craft = Rotorcraft::new();
        craft.body_mut().state.speed = 10.0;
        let mut canvas = MatrixStack::new();

        craft.draw(&mut canvas);

        // Full speed pitches by -30 degrees about z: the vehicle's +x axis dips.
        let forward = canvas.calls()[0]
            .transform
            .transform_vector3(DVec3::X)
            .normalize();
        assert!((forward.y + 0.5).abs() < 1e-9);
    }

    fn keel_axes(craft: &mut Rotorcraft) -> (DVec3, DVec3) {
        let mut canvas = MatrixStack::new();
        craft.draw(&mut canvas);
        let transform = canvas.calls()[0].transform;
        (
            transform.transform_vector3(DVec3::X).normalize(),
            transform.transform_vector3(DVec3::Z).normalize(),
        )
    }

    #[test]
    fn test_banks_into_turn_at_speed() {
        let mut craft = Rotorcraft::new();
        let state = &mut craft.body_mut().state;
        state.speed = 10.0;
        state.steering = 15.0;

        let (forward, side) = keel_axes(&mut craft);

        // Banking about the pitched x axis leaves it where the pitch put it.
        let (sin30, cos30) = 30f64.to_radians().sin_cos();
        assert!((forward - DVec3::new(cos30, -sin30, 0.0)).length() < 1e-9);
        // Local +z tilts 15 degrees away from world +z, still square to x.
        assert!((side.dot(DVec3::Z) - 15f64.to_radians().cos()).abs() < 1e-9);
        assert!(side.dot(forward).abs() < 1e-9);
        assert!(side.y < 0.0);
    }

    #[test]
    fn test_no_bank_at_rest_with_full_lock() {
        let mut craft = Rotorcraft::new();
        craft.body_mut().state.steering = 15.0;

        let (forward, side) = keel_axes(&mut craft);

        assert!((forward - DVec3::X).length() < 1e-9);
        assert!((side - DVec3::Z).length() < 1e-9);
    }
}
