//! Wireframe viewer and headless driver for primrig vehicles.
//!
//! The library half holds everything that does not need a window: building
//! vehicles from the command line, turning solids into line segments, and
//! the fixed-step simulation loop used by `drive-sim`.

pub mod roster;
pub mod sim;
pub mod wireframe;
