//! Launch parameter parsing for the viewer.

use std::path::PathBuf;

use clap::Parser;
use primrig_viewer::roster::VehicleKind;

/// Launch parameters for the viewer.
#[derive(Debug)]
pub struct LaunchParams {
    /// Vehicles to spawn, in Tab order.
    pub vehicles: Vec<VehicleKind>,
    /// Model file for imported vehicles.
    pub model: Option<PathBuf>,
    /// Handling file applied to every vehicle.
    pub handling: Option<PathBuf>,
    /// Uniform scale for vehicles that support it.
    pub size: f64,
}

#[derive(Parser)]
#[command(about = "Wireframe viewer for primrig vehicles")]
struct CliArgs {
    /// Vehicles to spawn (repeatable).
    #[arg(long = "vehicle", value_enum, default_values_t = [VehicleKind::Ground, VehicleKind::Rotor])]
    vehicles: Vec<VehicleKind>,

    /// Vehicle model file (JSON) for imported vehicles.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Handling file (JSON); missing fields keep their defaults.
    #[arg(long)]
    handling: Option<PathBuf>,

    /// Uniform vehicle scale.
    #[arg(long, default_value_t = 1.0)]
    size: f64,
}

/// Parse launch parameters from the command line.
pub fn parse() -> LaunchParams {
    let args = CliArgs::parse();
    LaunchParams {
        vehicles: args.vehicles,
        model: args.model,
        handling: args.handling,
        size: args.size,
    }
}
