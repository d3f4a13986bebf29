//! Debounced mode selector.
//!
//! Turns a stream of orientation samples into accepted mode transitions. A
//! transition is accepted only when the classified mode differs from the
//! active one and strictly more than the cooldown has elapsed since the last
//! accepted transition. Heading refreshes while in compass mode are not
//! transitions and skip the gate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{classify, Mode};
use crate::sensor::OrientationSample;

pub const DEFAULT_COOLDOWN_MS: u64 = 450;

/// What a single sample did to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Observation {
    /// Newly accepted mode, if the sample caused a transition.
    pub transition: Option<Mode>,
    /// Rounded heading, present while compass is the active mode.
    pub heading: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeSelector {
    current: Mode,
    /// Monotonic instant (ms) of the last accepted transition.
    last_transition_ms: Option<u64>,
    cooldown_ms: u64,
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS)
    }
}

impl ModeSelector {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            current: Mode::None,
            last_transition_ms: None,
            cooldown_ms,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    pub fn last_transition_ms(&self) -> Option<u64> {
        self.last_transition_ms
    }

    /// Feed one orientation sample observed at `now_ms`.
    pub fn observe(&mut self, sample: &OrientationSample, now_ms: u64) -> Observation {
        let Some(angles) = sample.angles() else {
            return Observation::default();
        };
        let Some(candidate) = classify(&angles) else {
            return Observation::default();
        };

        let transition = self.try_switch(candidate, now_ms).then_some(candidate);

        let heading = (candidate == Mode::Compass && self.current == Mode::Compass)
            .then(|| angles.alpha.round() as i32);

        Observation {
            transition,
            heading,
        }
    }

    fn try_switch(&mut self, candidate: Mode, now_ms: u64) -> bool {
        if candidate == self.current {
            return false;
        }
        if let Some(last) = self.last_transition_ms {
            if now_ms.saturating_sub(last) <= self.cooldown_ms {
                return false;
            }
        }
        debug!(from = %self.current, to = %candidate, now_ms, "mode transition accepted");
        self.current = candidate;
        self.last_transition_ms = Some(now_ms);
        true
    }
}
