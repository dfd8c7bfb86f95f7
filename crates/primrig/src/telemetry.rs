//! Per-frame vehicle telemetry as CSV.
//!
//! The column list and row format come from one schema, so the header can
//! never drift from the rows. Rows go to any [`TelemetryOutput`].

use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::{Path, PathBuf},
};

use crate::{
    config::Handling,
    error::{Error, Result},
    kinematics::KinematicState,
};

/// Everything one telemetry row is computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetrySnapshot {
    /// Simulated time at the end of the frame (s).
    pub elapsed: f64,
    pub dt: f64,
    pub target_speed: f64,
    pub target_steering: f64,
    /// State after integration.
    pub state: KinematicState,
    pub handling: Handling,
}

/// Destination for telemetry lines.
pub trait TelemetryOutput: Send + Sync {
    /// Write the CSV header.
    fn write_header(&mut self, header: &str);
    /// Write a data row.
    fn write_row(&mut self, row: &str);
}

/// Prints to stdout.
pub struct StdoutTelemetryOutput;

impl TelemetryOutput for StdoutTelemetryOutput {
    fn write_header(&mut self, header: &str) {
        println!("{header}");
    }

    fn write_row(&mut self, row: &str) {
        println!("{row}");
    }
}

/// Writes to a CSV file, truncating it when the header is written.
pub struct CsvFileTelemetryOutput {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvFileTelemetryOutput {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "writing telemetry");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            tracing::warn!(path = %self.path.display(), "telemetry write failed: {e}");
        }
    }

    fn truncate(&mut self) -> std::io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().set_len(0)?;
        self.writer.get_mut().rewind()
    }

    /// Flush buffered rows to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl TelemetryOutput for CsvFileTelemetryOutput {
    fn write_header(&mut self, header: &str) {
        // Start over so a reset never leaves stale rows behind.
        if let Err(e) = self.truncate() {
            tracing::warn!(path = %self.path.display(), "failed to reset telemetry file: {e}");
        }
        self.write_line(header);
    }

    fn write_row(&mut self, row: &str) {
        self.write_line(row);
    }
}

impl Drop for CsvFileTelemetryOutput {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("{e}");
        }
    }
}

/// Collects lines in memory.
impl TelemetryOutput for Vec<String> {
    fn write_header(&mut self, header: &str) {
        self.push(header.to_string());
    }

    fn write_row(&mut self, row: &str) {
        self.push(row.to_string());
    }
}

/// Define the CSV schema and generate the reset and emit functions from it.
macro_rules! define_telemetry {
    (
        columns: { $( $name:ident : $fmt:literal ),* $(,)? },
        prelude: |$snapshot:ident| { $( $prelude:stmt );* $(;)? },
        row_values: { $( $val:expr ),* $(,)? }
    ) => {
        /// CSV header string.
        const CSV_HEADER: &str = concat!( $( stringify!($name), "," ),* );

        /// Write the header to `output`.
        pub fn reset_telemetry_to(output: &mut dyn TelemetryOutput) {
            output.write_header(CSV_HEADER.trim_end_matches(','));
        }

        /// Write one row for `snapshot` to `output`.
        pub fn emit_telemetry_to($snapshot: &TelemetrySnapshot, output: &mut dyn TelemetryOutput) {
            $( $prelude )*

            let line = format!( concat!( $( $fmt, "," ),* ), $( $val ),* );
            output.write_row(line.trim_end_matches(','));
        }
    };
}

define_telemetry! {
    columns: {
        t: "{:.4}",
        dt: "{:.5}",
        target_speed: "{:.3}",
        target_steer: "{:.3}",
        x: "{:.3}",
        z: "{:.3}",
        heading: "{:.2}",
        speed: "{:.3}",
        steering: "{:.3}",
        speed_rate: "{:.3}",
        steer_rate: "{:.3}",
        range: "{:.3}",
    },
    prelude: |t| {
        let state = &t.state;
        let range = state.x.hypot(state.z);
    },
    row_values: {
        t.elapsed,
        t.dt,
        t.target_speed,
        t.target_steering,
        state.x,
        state.z,
        state.rotation,
        state.speed,
        state.steering,
        t.handling.speed_rate(state.speed),
        t.handling.steering_rate(state.steering),
        range,
    }
}
