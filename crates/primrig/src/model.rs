//! Serializable vehicle descriptors.
//!
//! A [`VehicleModel`] is a named list of shapes in draw order. It is the
//! input format for [`ImportedVehicle`](crate::ImportedVehicle) and can be
//! captured from any live vehicle.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    collection::Part,
    error::{Error, Result},
    parts::PartRole,
    shape::{Capabilities, Rgb, Shape, Solid},
    vehicle::Vehicle,
};

/// One shape of a [`VehicleModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub role: PartRole,
    /// Position in vehicle space.
    pub position: [f64; 3],
    /// Base yaw in degrees.
    #[serde(default)]
    pub rotation: f64,
    pub color: Rgb,
    #[serde(default)]
    pub spin: bool,
    #[serde(default)]
    pub steer: bool,
    pub solid: Solid,
}

impl ShapeModel {
    /// Describe a part as built, ignoring its animated rotations.
    pub fn from_part(part: &Part) -> Self {
        let shape = &part.shape;
        Self {
            label: Some(part.label.clone()),
            role: part.role,
            position: shape.position().to_array(),
            rotation: shape.original_rotation(),
            color: shape.color(),
            spin: shape.can_spin(),
            steer: shape.can_steer(),
            solid: *shape.solid(),
        }
    }

    /// Build the shape this entry describes.
    pub fn to_shape(&self) -> Shape {
        Shape::new(self.solid, DVec3::from_array(self.position))
            .with_rotation(self.rotation)
            .with_color(self.color)
            .with_capabilities(Capabilities {
                spin: self.spin,
                steer: self.steer,
            })
    }

    fn check(&self) -> std::result::Result<(), String> {
        self.solid.check_dimensions()?;

        if let Some(value) = self.position.iter().find(|v| !v.is_finite()) {
            return Err(format!("position must be finite, got {value}"));
        }
        if !self.rotation.is_finite() {
            return Err(format!("rotation must be finite, got {}", self.rotation));
        }
        if let Some(value) = self
            .color
            .to_array()
            .into_iter()
            .find(|c| !(0.0..=1.0).contains(c))
        {
            return Err(format!("color components must be in [0, 1], got {value}"));
        }
        Ok(())
    }
}

/// A named shape list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleModel {
    #[serde(default)]
    pub name: String,
    pub shapes: Vec<ShapeModel>,
}

impl VehicleModel {
    /// Parse a model document. Does not validate.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Parse {
            context: "vehicle model",
            message: e.to_string(),
        })
    }

    /// Load and validate a model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model = Self::from_json(&crate::error::read_to_string(path)?)?;
        model.validate()?;
        tracing::debug!(
            path = %path.display(),
            name = %model.name,
            shapes = model.shapes.len(),
            "loaded vehicle model"
        );
        Ok(model)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Parse {
            context: "vehicle model",
            message: e.to_string(),
        })
    }

    /// Check every shape, reporting the first bad one by index.
    pub fn validate(&self) -> Result<()> {
        for (index, shape) in self.shapes.iter().enumerate() {
            shape
                .check()
                .map_err(|detail| Error::InvalidShape { index, detail })?;
        }
        Ok(())
    }

    /// Snapshot the parts of any vehicle, named after its kind.
    pub fn capture(vehicle: &dyn Vehicle) -> Self {
        Self {
            name: vehicle.kind().to_string(),
            shapes: vehicle
                .shapes()
                .parts()
                .iter()
                .map(ShapeModel::from_part)
                .collect(),
        }
    }
}
