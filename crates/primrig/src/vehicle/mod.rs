//! Vehicle contract and the built-in variants.
//!
//! Every vehicle owns a [`VehicleBody`]: kinematic state, handling, size and
//! parts. The [`Vehicle`] trait supplies integration on top of that and
//! leaves drawing to each variant.

mod ground;
mod imported;
mod rotor;

use glam::DVec3;

pub use ground::GroundVehicle;
pub use imported::ImportedVehicle;
pub use rotor::Rotorcraft;

use crate::{
    animation::Animation,
    canvas::Canvas,
    collection::ShapeCollection,
    config::Handling,
    kinematics::{HeadingRule, KinematicState},
};

/// State shared by every vehicle variant.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleBody {
    pub state: KinematicState,
    pub handling: Handling,
    /// Uniform scale applied by variants that support it.
    pub size: f64,
    pub shapes: ShapeCollection,
}

impl VehicleBody {
    /// A body at rest at the origin with no parts.
    pub fn new(handling: Handling) -> Self {
        Self {
            state: KinematicState::default(),
            handling,
            size: 1.0,
            shapes: ShapeCollection::new(),
        }
    }

    /// Move the canvas to the vehicle's position and heading.
    pub fn place<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.translate(DVec3::new(self.state.x, 0.0, self.state.z));
        canvas.rotate(-self.state.rotation, DVec3::Y);
    }

    /// Animate each part with `animation`, then draw it.
    pub fn animate_and_draw<C: Canvas + ?Sized>(&mut self, animation: Animation, canvas: &mut C) {
        let state = self.state;
        let handling = self.handling;
        for shape in self.shapes.iter_mut() {
            animation.animate(shape, &state, &handling);
            shape.draw(&mut *canvas);
        }
    }
}

/// A drawable vehicle driven by speed and steering intent.
///
/// One driver calls [`Vehicle::integrate_toward`] and then [`Vehicle::draw`]
/// once per frame.
pub trait Vehicle: Send + Sync {
    /// Short name of the variant.
    fn kind(&self) -> &'static str;

    fn body(&self) -> &VehicleBody;

    fn body_mut(&mut self) -> &mut VehicleBody;

    /// How this variant turns.
    fn heading_rule(&self) -> HeadingRule {
        HeadingRule::SpeedProportional
    }

    /// Draw inside a scoped transform, animating capable parts first.
    ///
    /// Implementations must leave the canvas's transform stack as they found
    /// it.
    fn draw(&mut self, canvas: &mut dyn Canvas);

    /// Change altitude by `delta` metres. Vehicles without lift ignore this.
    fn climb(&mut self, _delta: f64) {}

    fn state(&self) -> &KinematicState {
        &self.body().state
    }

    fn shapes(&self) -> &ShapeCollection {
        &self.body().shapes
    }

    /// Advance the kinematic state by `dt` seconds.
    fn integrate(&mut self, dt: f64) {
        let rule = self.heading_rule();
        let body = self.body_mut();
        body.state.integrate(dt, &body.handling, rule);
    }

    /// Ease toward the target speed and steering, then integrate.
    fn integrate_toward(&mut self, target_speed: f64, target_steering: f64, dt: f64) {
        let rule = self.heading_rule();
        let body = self.body_mut();
        body.state
            .integrate_toward(target_speed, target_steering, dt, &body.handling, rule);
    }
}
