use serde::{Deserialize, Serialize};

pub const MAX_LINEAR_SPEED: f64 = 1.0;
pub const MAX_ANGULAR_SPEED: f64 = 1.5;

/// Velocity pair as it goes over the wire to `/cmd_vel`
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct VelocityCommand {
    #[serde(rename = "linear_x")]
    pub linear: f64,
    #[serde(rename = "angular_z")]
    pub angular: f64,
}

impl VelocityCommand {
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn stopped() -> Self {
        Self {
            linear: 0.0,
            angular: 0.0,
        }
    }

    pub fn readout(&self) -> VelocityReadout {
        VelocityReadout {
            linear: format!("{:.2}", self.linear),
            angular: format!("{:.2}", self.angular),
        }
    }
}

/// Text shown on a speed display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelocityReadout {
    pub linear: String,
    pub angular: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    #[serde(default = "default_max_linear")]
    pub max_linear: f64,
    #[serde(default = "default_max_angular")]
    pub max_angular: f64,
}

fn default_max_linear() -> f64 {
    MAX_LINEAR_SPEED
}

fn default_max_angular() -> f64 {
    MAX_ANGULAR_SPEED
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            max_linear: MAX_LINEAR_SPEED,
            max_angular: MAX_ANGULAR_SPEED,
        }
    }
}
