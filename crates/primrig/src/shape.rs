//! Primitive solids and the shape wrapper the animation rules act on.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, TransformScope};

/// Geometry of a primitive solid, in its own local frame.
///
/// Prisms stand on their local origin (y from 0 up to their height) and are
/// centred in x and z. Cylinders are centred on the origin with their axis
/// along z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Solid {
    /// Circular cylinder.
    Cylinder { radius: f64, depth: f64 },
    /// Axis-aligned box.
    RectPrism { x_len: f64, y_len: f64, z_len: f64 },
    /// Triangle extruded along z: sides `a` and `b` meet at `angle` degrees.
    TriPrism {
        a: f64,
        b: f64,
        angle: f64,
        depth: f64,
    },
    /// Trapezoid extruded along z: base `a`, top `b` shifted by `offset`.
    TrapPrism {
        a: f64,
        b: f64,
        height: f64,
        offset: f64,
        depth: f64,
    },
}

impl Solid {
    /// Short name of the solid kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Solid::Cylinder { .. } => "cylinder",
            Solid::RectPrism { .. } => "rect_prism",
            Solid::TriPrism { .. } => "tri_prism",
            Solid::TrapPrism { .. } => "trap_prism",
        }
    }

    /// The same solid with every length multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Solid::Cylinder { radius, depth } => Solid::Cylinder {
                radius: radius * factor,
                depth: depth * factor,
            },
            Solid::RectPrism { x_len, y_len, z_len } => Solid::RectPrism {
                x_len: x_len * factor,
                y_len: y_len * factor,
                z_len: z_len * factor,
            },
            Solid::TriPrism { a, b, angle, depth } => Solid::TriPrism {
                a: a * factor,
                b: b * factor,
                angle,
                depth: depth * factor,
            },
            Solid::TrapPrism {
                a,
                b,
                height,
                offset,
                depth,
            } => Solid::TrapPrism {
                a: a * factor,
                b: b * factor,
                height: height * factor,
                offset: offset * factor,
                depth: depth * factor,
            },
        }
    }

    /// Check that every length is finite and positive.
    ///
    /// The trapezoid offset and triangle angle only need to be finite.
    pub fn check_dimensions(&self) -> Result<(), String> {
        let (lengths, free): (Vec<(&str, f64)>, Vec<(&str, f64)>) = match *self {
            Solid::Cylinder { radius, depth } => (vec![("radius", radius), ("depth", depth)], vec![]),
            Solid::RectPrism { x_len, y_len, z_len } => (
                vec![("x_len", x_len), ("y_len", y_len), ("z_len", z_len)],
                vec![],
            ),
            Solid::TriPrism { a, b, angle, depth } => (
                vec![("a", a), ("b", b), ("depth", depth)],
                vec![("angle", angle)],
            ),
            Solid::TrapPrism {
                a,
                b,
                height,
                offset,
                depth,
            } => (
                vec![("a", a), ("b", b), ("height", height), ("depth", depth)],
                vec![("offset", offset)],
            ),
        };

        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "{} {name} must be finite and positive, got {value}",
                    self.kind_name()
                ));
            }
        }
        for (name, value) in free {
            if !value.is_finite() {
                return Err(format!(
                    "{} {name} must be finite, got {value}",
                    self.kind_name()
                ));
            }
        }
        Ok(())
    }
}

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Neutral grey of the given intensity.
    pub const fn grey(level: f64) -> Self {
        Self::new(level, level, level)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(color: Rgb) -> Self {
        color.to_array()
    }
}

/// Which animation rules apply to a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// Continuously accumulating spin (wheels, rotors).
    pub spin: bool,
    /// Tracks the steering input (front wheels, control surfaces).
    pub steer: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        spin: false,
        steer: false,
    };
    pub const SPIN: Self = Self {
        spin: true,
        steer: false,
    };
    pub const STEER: Self = Self {
        spin: false,
        steer: true,
    };
    pub const SPIN_AND_STEER: Self = Self {
        spin: true,
        steer: true,
    };
}

/// A positioned, colored solid with the rotation state the animation rules drive.
///
/// Capabilities can only be set through the consuming builder methods, so
/// they are fixed once a shape has been handed to a vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    solid: Solid,
    position: DVec3,
    original_rotation: f64,
    rotation: f64,
    spin_rotation: f64,
    color: Rgb,
    capabilities: Capabilities,
}

impl Shape {
    /// A shape at `position` with no rotation, black, and no capabilities.
    pub fn new(solid: Solid, position: DVec3) -> Self {
        Self {
            solid,
            position,
            original_rotation: 0.0,
            rotation: 0.0,
            spin_rotation: 0.0,
            color: Rgb::default(),
            capabilities: Capabilities::NONE,
        }
    }

    /// Set the base yaw (degrees). Also becomes the current rotation.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.original_rotation = degrees;
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Enable or disable spin tracking.
    #[must_use]
    pub fn with_spin(mut self, spin: bool) -> Self {
        self.capabilities.spin = spin;
        self
    }

    /// Enable or disable steering tracking.
    #[must_use]
    pub fn with_steer(mut self, steer: bool) -> Self {
        self.capabilities.steer = steer;
        self
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, r: f64, g: f64, b: f64) {
        self.color = Rgb::new(r, g, b);
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn can_spin(&self) -> bool {
        self.capabilities.spin
    }

    pub fn can_steer(&self) -> bool {
        self.capabilities.steer
    }

    /// Yaw the shape was built with. Never changes.
    pub fn original_rotation(&self) -> f64 {
        self.original_rotation
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    pub fn spin_rotation(&self) -> f64 {
        self.spin_rotation
    }

    pub fn set_spin_rotation(&mut self, degrees: f64) {
        self.spin_rotation = degrees;
    }

    /// Draw under the canvas's current transform.
    ///
    /// Moves to the shape's position, yaws by its rotation about y and spins
    /// by its spin rotation about its local z axis.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let mut scope = TransformScope::new(canvas);
        scope.translate(self.position);
        scope.rotate(-self.rotation, DVec3::Y);
        scope.rotate(-self.spin_rotation, DVec3::Z);
        scope.draw_solid(&self.solid, self.color);
    }
}
