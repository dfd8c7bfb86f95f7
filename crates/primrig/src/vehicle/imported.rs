//! Vehicles assembled at runtime from externally supplied shapes.

use super::{Vehicle, VehicleBody};
use crate::{
    animation::Animation,
    canvas::{Canvas, TransformScope},
    config::Handling,
    error::Result,
    model::VehicleModel,
    parts::PartRole,
    shape::Shape,
};

/// A vehicle with no built-in parts.
///
/// Shapes are appended by the loader, either one at a time or from a
/// [`VehicleModel`]. Animation follows the rolling rules of a ground vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportedVehicle {
    name: String,
    body: VehicleBody,
}

impl ImportedVehicle {
    /// An empty vehicle at the origin.
    pub fn new(handling: Handling) -> Self {
        Self {
            name: String::new(),
            body: VehicleBody::new(handling),
        }
    }

    /// Build a vehicle from a validated model.
    pub fn from_model(model: &VehicleModel, handling: Handling) -> Result<Self> {
        model.validate()?;

        let mut vehicle = Self::new(handling);
        vehicle.name.clone_from(&model.name);
        for (index, shape) in model.shapes.iter().enumerate() {
            let label = shape
                .label
                .clone()
                .unwrap_or_else(|| format!("part{index}"));
            vehicle.add_part(label, shape.role, shape.to_shape());
        }

        tracing::info!(
            name = %vehicle.name,
            parts = vehicle.body.shapes.len(),
            "imported vehicle"
        );
        Ok(vehicle)
    }

    /// Model name, empty for vehicles built by hand.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an unlabeled shape. Returns its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.body.shapes.add_shape(shape)
    }

    /// Append a labeled shape. Returns its index.
    pub fn add_part(&mut self, label: impl Into<String>, role: PartRole, shape: Shape) -> usize {
        self.body.shapes.add_part(label, role, shape)
    }
}

impl Vehicle for ImportedVehicle {
    fn kind(&self) -> &'static str {
        "imported"
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
        self.body.animate_and_draw(Animation::Rolling, &mut *scope);
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::{
        canvas::MatrixStack,
        shape::{Capabilities, Rgb, Solid},
    };

    fn wheel() -> Shape {
        Shape::new(
            Solid::Cylinder {
                radius: 0.4,
                depth: 0.3,
            },
            DVec3::new(1.0, 0.4, 0.0),
        )
    }

    #[test]
    fn test_empty_vehicle_draws_nothing() {
        let mut vehicle = ImportedVehicle::new(Handling::default());
        let mut canvas = MatrixStack::new();

        vehicle.integrate_toward(3.0, 0.0, 0.1);
        vehicle.draw(&mut canvas);

        assert!(vehicle.shapes().is_empty());
        assert!(canvas.calls().is_empty());
        assert_eq!(canvas.depth(), 0);
        assert!(vehicle.state().x > 0.0);
    }

    #[test]
    fn test_added_shapes_animate_like_wheels() {
        let mut vehicle = ImportedVehicle::new(Handling::default());
        vehicle.add_shape(wheel().with_capabilities(Capabilities::SPIN_AND_STEER));
        vehicle.add_part(
            "deck",
            PartRole::Body,
            Shape::new(
                Solid::RectPrism {
                    x_len: 2.0,
                    y_len: 0.2,
                    z_len: 1.0,
                },
                DVec3::ZERO,
            )
            .with_color(Rgb::grey(0.5)),
        );
        vehicle.body_mut().state.speed = 3.0;
        vehicle.body_mut().state.steering = -8.0;

        vehicle.draw(&mut MatrixStack::new());

        let wheel = vehicle.shapes().get(0).unwrap();
        assert_eq!(wheel.spin_rotation(), 6.0);
        assert_eq!(wheel.rotation(), -8.0);
        let deck = &vehicle.shapes().find("deck").unwrap().shape;
        assert_eq!(deck.rotation(), 0.0);
        assert_eq!(deck.spin_rotation(), 0.0);
    }

    #[test]
    fn test_ignores_size() {
        let mut vehicle = ImportedVehicle::new(Handling::default());
        vehicle.add_shape(wheel());
        vehicle.body_mut().size = 3.0;
        let mut canvas = MatrixStack::new();

        vehicle.draw(&mut canvas);

        let origin = canvas.calls()[0].transform.transform_point3(DVec3::ZERO);
        assert!((origin - DVec3::new(1.0, 0.4, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_from_model_rejects_invalid_shape() {
        let json = r#"{
            "name": "broken",
            "shapes": [
                { "position": [0, 0, 0], "color": [1, 1, 1],
                  "solid": { "type": "cylinder", "radius": 0.5, "depth": 1.0 } },
                { "position": [0, 0, 0], "color": [1, 1, 1],
                  "solid": { "type": "rect_prism", "x_len": 1.0, "y_len": -1.0, "z_len": 1.0 } }
            ]
        }"#;
        let model = VehicleModel::from_json(json).unwrap();

        let err = ImportedVehicle::from_model(&model, Handling::default()).unwrap_err();

        assert!(matches!(err, crate::Error::InvalidShape { index: 1, .. }));
    }
}
