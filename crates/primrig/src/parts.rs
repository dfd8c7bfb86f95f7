//! Declarative part layouts and role-keyed paint schemes.
//!
//! Built-in vehicles describe themselves as a static list of [`PartSpec`]s
//! and get their colors from a [`Livery`]. Rules refer to roles and labels,
//! never to positions in the list, so reordering parts cannot recolor the
//! wrong one.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    collection::ShapeCollection,
    shape::{Capabilities, Rgb, Shape, Solid},
};

/// What a part is for. Used to paint parts in bulk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartRole {
    Body,
    Cabin,
    Trim,
    Wheel,
    Strut,
    Rotor,
    Wing,
    Pylon,
    Pod,
    #[default]
    Other,
}

/// Static description of one part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartSpec {
    pub label: &'static str,
    pub role: PartRole,
    pub solid: Solid,
    pub position: DVec3,
    /// Base yaw in degrees.
    pub rotation: f64,
    pub capabilities: Capabilities,
}

impl PartSpec {
    /// A part with no rotation and no capabilities.
    pub const fn new(label: &'static str, role: PartRole, solid: Solid, position: DVec3) -> Self {
        Self {
            label,
            role,
            solid,
            position,
            rotation: 0.0,
            capabilities: Capabilities::NONE,
        }
    }

    #[must_use]
    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub const fn with(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Build the shape, scaling lengths and position by `scale`.
    pub fn build(&self, scale: f64) -> Shape {
        Shape::new(self.solid.scaled(scale), self.position * scale)
            .with_rotation(self.rotation)
            .with_capabilities(self.capabilities)
    }
}

/// Attach every spec to `shapes` in order.
pub fn assemble(shapes: &mut ShapeCollection, specs: &[PartSpec], scale: f64) {
    for spec in specs {
        shapes.add_part(spec.label, spec.role, spec.build(scale));
    }
}

#[derive(Clone, Debug, PartialEq)]
enum PaintRule {
    Role(PartRole, Rgb),
    Part(&'static str, Rgb),
}

/// Ordered paint rules. Later rules win where they overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Livery {
    rules: Vec<PaintRule>,
}

impl Livery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint every part with `role`.
    #[must_use]
    pub fn role(mut self, role: PartRole, color: Rgb) -> Self {
        self.rules.push(PaintRule::Role(role, color));
        self
    }

    /// Paint the part labelled `label`.
    #[must_use]
    pub fn part(mut self, label: &'static str, color: Rgb) -> Self {
        self.rules.push(PaintRule::Part(label, color));
        self
    }

    /// Apply the rules in order.
    pub fn apply(&self, shapes: &mut ShapeCollection) {
        for rule in &self.rules {
            match *rule {
                PaintRule::Role(role, color) => {
                    if shapes.paint_role(role, color) == 0 {
                        tracing::debug!(?role, "livery role matched no parts");
                    }
                }
                PaintRule::Part(label, color) => {
                    if !shapes.paint_part(label, color) {
                        tracing::warn!(label, "livery names a part that does not exist");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[PartSpec] = &[
        PartSpec::new(
            "wheel",
            PartRole::Wheel,
            Solid::Cylinder {
                radius: 0.5,
                depth: 1.0,
            },
            DVec3::new(1.0, 0.5, 2.0),
        )
        .with(Capabilities::SPIN),
        PartSpec::new(
            "blade",
            PartRole::Rotor,
            Solid::RectPrism {
                x_len: 3.6,
                y_len: 0.03,
                z_len: 0.2,
            },
            DVec3::new(0.0, 0.9, 0.0),
        )
        .rotated(45.0)
        .with(Capabilities::STEER),
    ];

    #[test]
    fn test_build_scales_lengths_not_angles() {
        let shape = SPECS[1].build(10.0);
        assert_eq!(shape.position(), DVec3::new(0.0, 9.0, 0.0));
        assert_eq!(shape.original_rotation(), 45.0);
        assert!(shape.can_steer());
        assert_eq!(
            *shape.solid(),
            Solid::RectPrism {
                x_len: 36.0,
                y_len: 0.3,
                z_len: 2.0,
            }
        );
    }

    #[test]
    fn test_assemble_keeps_labels_and_roles() {
        let mut shapes = ShapeCollection::new();
        assemble(&mut shapes, SPECS, 1.0);

        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes.parts()[0].label, "wheel");
        assert_eq!(shapes.parts()[1].role, PartRole::Rotor);
    }

    #[test]
    fn test_livery_order_matters() {
        let mut shapes = ShapeCollection::new();
        assemble(&mut shapes, SPECS, 1.0);

        Livery::new()
            .part("wheel", Rgb::grey(0.05))
            .role(PartRole::Wheel, Rgb::grey(0.2))
            .role(PartRole::Rotor, Rgb::grey(0.4))
            .apply(&mut shapes);

        assert_eq!(shapes.find("wheel").unwrap().shape.color(), Rgb::grey(0.2));
        assert_eq!(shapes.find("blade").unwrap().shape.color(), Rgb::grey(0.4));
    }
}
