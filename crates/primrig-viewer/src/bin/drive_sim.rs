//! Headless vehicle driver.
//!
//! Drives one vehicle toward a fixed speed and steering intent at a fixed
//! timestep, without a window, and prints a summary. Telemetry rows can go
//! to a CSV file or stdout.
//!
//! Run with: cargo run -p primrig-viewer --bin drive-sim -- --vehicle rotor --steer 15

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use primrig::{
    VehicleModel,
    telemetry::{CsvFileTelemetryOutput, StdoutTelemetryOutput, TelemetryOutput},
};
use primrig_viewer::{
    roster::{VehicleKind, build_vehicle, load_handling},
    sim::{self, SimConfig},
};

#[derive(Parser)]
#[command(about = "Drive a primrig vehicle headless and report how it behaves")]
struct CliArgs {
    /// Vehicle to drive.
    #[arg(long, value_enum, default_value_t = VehicleKind::default())]
    vehicle: VehicleKind,

    /// Vehicle model file (JSON) for the imported vehicle.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Handling file (JSON); missing fields keep their defaults.
    #[arg(long)]
    handling: Option<PathBuf>,

    /// Simulated seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Fixed timestep in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Target speed in m/s.
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    speed: f64,

    /// Target steering in degrees (positive is left).
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    steer: f64,

    /// Write telemetry CSV to this file.
    #[arg(long, conflicts_with = "stdout")]
    telemetry: Option<PathBuf>,

    /// Stream telemetry CSV to stdout.
    #[arg(long)]
    stdout: bool,
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(&CliArgs::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every frame left the transform stack balanced.
fn run(args: &CliArgs) -> primrig::Result<bool> {
    let handling = load_handling(args.handling.as_deref())?;
    let model = args.model.as_deref().map(VehicleModel::load).transpose()?;
    let mut vehicle = build_vehicle(args.vehicle, model.as_ref(), handling)?;

    let config = SimConfig {
        duration: args.duration,
        dt: args.dt,
        target_speed: args.speed,
        target_steering: args.steer,
    };

    let mut file_output = args
        .telemetry
        .as_deref()
        .map(CsvFileTelemetryOutput::create)
        .transpose()?;
    let mut stdout_output = StdoutTelemetryOutput;
    let telemetry: Option<&mut dyn TelemetryOutput> = if args.stdout {
        Some(&mut stdout_output)
    } else {
        file_output
            .as_mut()
            .map(|output| output as &mut dyn TelemetryOutput)
    };

    eprintln!(
        "# Driving {} ({} parts) for {} frames at dt={:.4}",
        vehicle.kind(),
        vehicle.shapes().len(),
        config.frames(),
        config.dt
    );
    let summary = sim::run(vehicle.as_mut(), &config, telemetry);
    if let Some(output) = file_output.as_mut() {
        output.flush()?;
    }

    eprintln!("# === {} ===", vehicle.kind());
    eprintln!("# Frames: {}", summary.frames);
    eprintln!("# Draw calls: {}", summary.draw_calls);
    eprintln!(
        "# Final position: ({:.3}, {:.3}) m",
        summary.final_x, summary.final_z
    );
    eprintln!("# Final heading: {:.2} deg", summary.final_heading);
    eprintln!(
        "# Final speed: {:.3} m/s, steering: {:.3} deg",
        summary.final_speed, summary.final_steering
    );
    eprintln!("# Max range: {:.3} m", summary.max_range);
    eprintln!("# Total turn: {:.2} deg", summary.total_turn);
    if summary.unbalanced_frames > 0 {
        eprintln!(
            "# ERROR: {} frames left the transform stack unbalanced",
            summary.unbalanced_frames
        );
    }

    Ok(summary.unbalanced_frames == 0)
}
