//! Four-wheeled road vehicle.

use glam::DVec3;

use super::{Vehicle, VehicleBody};
use crate::{
    animation::Animation,
    canvas::{Canvas, TransformScope},
    config::Handling,
    parts::{Livery, PartRole, PartSpec, assemble},
    shape::{Capabilities, Rgb, Solid},
};

const WHEEL: Solid = Solid::Cylinder {
    radius: 0.5,
    depth: 1.0,
};

/// Wheels first, then bodywork, matching draw order.
const PARTS: &[PartSpec] = &[
    PartSpec::new(
        "left_rear_wheel",
        PartRole::Wheel,
        WHEEL,
        DVec3::new(-1.5, 0.5, -2.0),
    )
    .with(Capabilities::SPIN),
    PartSpec::new(
        "right_rear_wheel",
        PartRole::Wheel,
        WHEEL,
        DVec3::new(-1.5, 0.5, 2.0),
    )
    .with(Capabilities::SPIN),
    PartSpec::new(
        "left_front_wheel",
        PartRole::Wheel,
        WHEEL,
        DVec3::new(1.5, 0.5, -2.0),
    )
    .with(Capabilities::SPIN_AND_STEER),
    PartSpec::new(
        "right_front_wheel",
        PartRole::Wheel,
        WHEEL,
        DVec3::new(1.5, 0.5, 2.0),
    )
    .with(Capabilities::SPIN_AND_STEER),
    PartSpec::new(
        "body",
        PartRole::Body,
        Solid::TrapPrism {
            a: 5.5,
            b: 3.5,
            height: 1.0,
            offset: 0.5,
            depth: 3.0,
        },
        DVec3::new(0.75, 1.0, 0.0),
    ),
    PartSpec::new(
        "cabin",
        PartRole::Cabin,
        Solid::RectPrism {
            x_len: 2.0,
            y_len: 0.5,
            z_len: 2.0,
        },
        DVec3::new(0.5, 2.0, 0.0),
    ),
    PartSpec::new(
        "spoiler",
        PartRole::Trim,
        Solid::TriPrism {
            a: 1.0,
            b: 0.5,
            angle: 160.0,
            depth: 3.0,
        },
        DVec3::new(-1.0, 2.0, 0.0),
    ),
];

fn livery() -> Livery {
    Livery::new()
        .role(PartRole::Wheel, Rgb::grey(0.2))
        .role(PartRole::Body, Rgb::new(0.7, 0.1, 0.2))
        .role(PartRole::Cabin, Rgb::grey(0.4))
        .role(PartRole::Trim, Rgb::new(0.5, 0.1, 0.2))
}

/// A car: rolling wheels, steerable front axle, turn rate scaled by speed.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundVehicle {
    body: VehicleBody,
}

impl Default for GroundVehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundVehicle {
    pub fn new() -> Self {
        Self::with_handling(Handling::default())
    }

    pub fn with_handling(handling: Handling) -> Self {
        let mut body = VehicleBody::new(handling);
        assemble(&mut body.shapes, PARTS, 1.0);
        livery().apply(&mut body.shapes);
        tracing::debug!(parts = body.shapes.len(), "built ground vehicle");
        Self { body }
    }
}

impl Vehicle for GroundVehicle {
    fn kind(&self) -> &'static str {
        "ground"
    }

    fn body(&self) -> &VehicleBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut VehicleBody {
        &mut self.body
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        let mut scope = TransformScope::new(canvas);
        self.body.place(&mut *scope);
        scope.scale(DVec3::splat(self.body.size));
        self.body.animate_and_draw(Animation::Rolling, &mut *scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::MatrixStack;

    #[test]
    fn test_layout() {
        let car = GroundVehicle::new();
        let shapes = car.shapes();

        assert_eq!(shapes.len(), 7);
        assert_eq!(shapes.spinning().count(), 4);
        assert_eq!(shapes.steering().count(), 2);
        assert_eq!(
            shapes.find("body").unwrap().shape.color(),
            Rgb::new(0.7, 0.1, 0.2)
        );
        assert_eq!(
            shapes.find("right_rear_wheel").unwrap().shape.color(),
            Rgb::grey(0.2)
        );
    }

    #[test]
    fn test_front_wheels_track_steering() {
        let mut car = GroundVehicle::new();
        car.integrate_toward(5.0, 10.0, 1.0);
        let mut canvas = MatrixStack::new();

        car.draw(&mut canvas);

        let steering = car.state().steering;
        for part in car.shapes() {
            let expected = if part.shape.can_steer() { steering } else { 0.0 };
            assert_eq!(part.shape.rotation(), expected, "{}", part.label);
        }
    }

    #[test]
    fn test_wheels_spin_with_speed() {
        let mut car = GroundVehicle::new();
        car.body_mut().state.speed = 1.0;
        let mut canvas = MatrixStack::new();

        car.draw(&mut canvas);
        car.draw(&mut canvas);

        for shape in car.shapes().spinning() {
            assert_eq!(shape.spin_rotation(), 4.0);
        }
        assert_eq!(canvas.calls().len(), 14);
    }

    #[test]
    fn test_spin_wraps_after_draw() {
        let mut car = GroundVehicle::new();
        for shape in car.body_mut().shapes.iter_mut() {
            shape.set_spin_rotation(359.0);
        }
        car.body_mut().state.speed = 1.0;

        car.draw(&mut MatrixStack::new());

        for shape in car.shapes().spinning() {
            assert_eq!(shape.spin_rotation(), 1.0);
        }
    }

    #[test]
    fn test_size_scales_parts() {
        let mut car = GroundVehicle::new();
        car.body_mut().size = 2.0;
        let mut canvas = MatrixStack::new();

        car.draw(&mut canvas);

        // Left front wheel is the third part, at (1.5, 0.5, -2) in vehicle space.
        let origin = canvas.calls()[2].transform.transform_point3(DVec3::ZERO);
        assert!((origin - DVec3::new(3.0, 1.0, -4.0)).length() < 1e-9);
    }
}
