//! Raw sensor readings as delivered by the host.
//!
//! Orientation angles may be missing when the platform has not produced a
//! full reading yet; such samples are dropped by the selector.

use serde::{Deserialize, Serialize};

/// Device orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationSample {
    /// Rotation around z (compass heading), 0..360.
    pub alpha: Option<f64>,
    /// Front-to-back tilt, -180..180.
    pub beta: Option<f64>,
    /// Left-to-right tilt, -90..90.
    pub gamma: Option<f64>,
}

/// An orientation sample with every angle present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl OrientationSample {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// `None` if any component is missing.
    pub fn angles(&self) -> Option<Angles> {
        Some(Angles {
            alpha: self.alpha?,
            beta: self.beta?,
            gamma: self.gamma?,
        })
    }
}

/// Acceleration including gravity, in the accelerometer's native units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Sum of absolute per-axis differences.
    pub fn manhattan_delta(&self, other: &MotionSample) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }
}
