//! Shake detection for surprise mode.
//!
//! Only the previous reading is retained. Every reading after the first is
//! compared against it, and a summed per-axis delta strictly above the
//! threshold reports a shake. Repeated shakes are not debounced.

use serde::{Deserialize, Serialize};

use crate::sensor::MotionSample;

pub const DEFAULT_SHAKE_THRESHOLD: f64 = 28.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShakeDetector {
    threshold: f64,
    previous: Option<MotionSample>,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SHAKE_THRESHOLD)
    }
}

impl ShakeDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            previous: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record `sample` as the new baseline; `true` if it constitutes a shake.
    pub fn observe(&mut self, sample: MotionSample) -> bool {
        let shaken = self
            .previous
            .map(|prev| sample.manhattan_delta(&prev) > self.threshold)
            .unwrap_or(false);
        self.previous = Some(sample);
        shaken
    }
}
