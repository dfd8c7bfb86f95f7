//! Kinematics and part animation for vehicles built from primitive solids.
//!
//! A vehicle owns a scalar motion state (position, heading, speed, steering)
//! and an ordered list of shapes. Each frame a driver integrates the state
//! toward some control intent, then the vehicle maps that state onto the
//! rotation of its spinning and steering parts and draws them through a
//! [`Canvas`].
//!
//! Nothing in this crate talks to a graphics API. Rendering goes through the
//! [`Canvas`] trait; [`MatrixStack`] is a recording implementation that
//! resolves every draw call to a world transform.

pub mod animation;
pub mod canvas;
pub mod collection;
pub mod config;
pub mod error;
pub mod kinematics;
pub mod model;
pub mod parts;
pub mod shape;
pub mod telemetry;
pub mod vehicle;

pub use canvas::{Canvas, DrawCall, MatrixStack, TransformScope, TransformStack};
pub use collection::{Part, ShapeCollection};
pub use config::Handling;
pub use error::{Error, Result};
pub use kinematics::{HeadingRule, KinematicState, clamp};
pub use model::{ShapeModel, VehicleModel};
pub use parts::{Livery, PartRole, PartSpec};
pub use shape::{Capabilities, Rgb, Shape, Solid};
pub use vehicle::{GroundVehicle, ImportedVehicle, Rotorcraft, Vehicle, VehicleBody};
