//! Error types for the primrig crate.

use std::{fmt, path::PathBuf};

/// Result type for primrig operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or validating vehicle data.
///
/// Kinematics and animation never fail; only the file-backed descriptors do.
#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// A document could not be parsed or serialized.
    Parse {
        /// What was being parsed.
        context: &'static str,
        /// The error message.
        message: String,
    },
    /// A shape in a vehicle model is malformed.
    InvalidShape {
        /// Position of the shape in the model.
        index: usize,
        /// Description of what was invalid.
        detail: String,
    },
    /// A handling configuration is unusable.
    InvalidHandling {
        /// Description of what was invalid.
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "i/o error on {}: {source}", path.display())
            }
            Error::Parse { context, message } => {
                write!(f, "failed to parse {context}: {message}")
            }
            Error::InvalidShape { index, detail } => {
                write!(f, "invalid shape at index {index}: {detail}")
            }
            Error::InvalidHandling { detail } => write!(f, "invalid handling: {detail}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read a whole file, attaching the path to any failure.
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
