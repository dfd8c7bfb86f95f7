//! Handling limits and response gains.
//!
//! The defaults reproduce the stock tuning. A JSON file may override any
//! subset of fields; missing fields keep their default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top forward speed (m/s).
pub const MAX_FORWARD_SPEED_MPS: f64 = 10.0;
/// Top reverse speed (m/s, negative).
pub const MAX_BACKWARD_SPEED_MPS: f64 = -4.0;
/// Full left steering lock (degrees, positive).
pub const MAX_LEFT_STEERING_DEGS: f64 = 15.0;
/// Full right steering lock (degrees, negative).
pub const MAX_RIGHT_STEERING_DEGS: f64 = -15.0;

/// Limits and first-order response gains for a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Handling {
    /// Forward speed bound (m/s).
    pub max_forward_speed: f64,
    /// Reverse speed bound (m/s).
    pub max_backward_speed: f64,
    /// Left steering bound (degrees).
    pub max_left_steering: f64,
    /// Right steering bound (degrees).
    pub max_right_steering: f64,
    /// Gain of the speed filter (1/s). 4 gives a 0.25 s time constant.
    pub speed_response: f64,
    /// Gain of the steering filter (1/s).
    pub steering_response: f64,
    /// Magnitude below which speed and steering snap to zero.
    pub deadzone: f64,
}

impl Default for Handling {
    fn default() -> Self {
        Self {
            max_forward_speed: MAX_FORWARD_SPEED_MPS,
            max_backward_speed: MAX_BACKWARD_SPEED_MPS,
            max_left_steering: MAX_LEFT_STEERING_DEGS,
            max_right_steering: MAX_RIGHT_STEERING_DEGS,
            speed_response: 4.0,
            steering_response: 6.0,
            deadzone: 0.1,
        }
    }
}

impl Handling {
    /// Parse a handling document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let handling: Self = serde_json::from_str(json).map_err(|e| Error::Parse {
            context: "handling",
            message: e.to_string(),
        })?;
        handling.validate()?;
        Ok(handling)
    }

    /// Load and validate a handling file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let handling = Self::from_json(&crate::error::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), ?handling, "loaded handling");
        Ok(handling)
    }

    /// Check that the values can drive the integrator and animation rules.
    ///
    /// Forward speed and left steering normalize the animation rates, so they
    /// must be non-zero.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_forward_speed", self.max_forward_speed),
            ("max_backward_speed", self.max_backward_speed),
            ("max_left_steering", self.max_left_steering),
            ("max_right_steering", self.max_right_steering),
            ("speed_response", self.speed_response),
            ("steering_response", self.steering_response),
            ("deadzone", self.deadzone),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidHandling {
                    detail: format!("{name} must be finite, got {value}"),
                });
            }
        }

        if self.max_forward_speed == 0.0 {
            return Err(Error::InvalidHandling {
                detail: "max_forward_speed must be non-zero".to_string(),
            });
        }
        if self.max_left_steering == 0.0 {
            return Err(Error::InvalidHandling {
                detail: "max_left_steering must be non-zero".to_string(),
            });
        }

        for (name, value) in [
            ("speed_response", self.speed_response),
            ("steering_response", self.steering_response),
            ("deadzone", self.deadzone),
        ] {
            if value < 0.0 {
                return Err(Error::InvalidHandling {
                    detail: format!("{name} must not be negative, got {value}"),
                });
            }
        }

        Ok(())
    }

    /// Speed as a fraction of the forward limit.
    pub fn speed_rate(&self, speed: f64) -> f64 {
        speed / self.max_forward_speed
    }

    /// Steering as a fraction of the left limit.
    pub fn steering_rate(&self, steering: f64) -> f64 {
        steering / self.max_left_steering
    }
}
