//! Countdown timer engine.
//!
//! The engine owns no thread. While running it holds one periodic task on
//! the shared [`Scheduler`]; the driver calls `tick()` each time that task
//! fires, and the tick is the only writer of `remaining_secs`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Expired) -> Idle (reset)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::format::format_hms;
use super::keypad::{Keypad, TimeUnit};
use crate::error::ValidationError;
use crate::events::Event;
use crate::scheduler::{Scheduler, TaskId, TaskOwner};

pub const TIMER_TICK_PERIOD_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    remaining_secs: u64,
    /// Total from the most recent successful start; reset restores it.
    original_secs: u64,
    keypad: Keypad,
    #[serde(skip)]
    task: Option<TaskId>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            remaining_secs: 0,
            original_secs: 0,
            keypad: Keypad::new(),
            task: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn original_secs(&self) -> u64 {
        self.original_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn task(&self) -> Option<TaskId> {
        self.task
    }

    /// Remaining time as `HH:MM:SS`.
    pub fn display(&self) -> String {
        format_hms(self.remaining_secs)
    }

    /// Label for the pause/resume toggle: the action it will perform next.
    pub fn toggle_label(&self) -> &'static str {
        if self.is_paused() {
            "Resume"
        } else {
            "Pause"
        }
    }

    // ── Keypad ───────────────────────────────────────────────────────

    pub fn select_unit(&mut self, unit: TimeUnit) {
        self.keypad.select(unit);
    }

    pub fn press_digit(&mut self, digit: char) -> Result<(), ValidationError> {
        self.keypad.press(digit)
    }

    pub fn clear_digits(&mut self) {
        self.keypad.clear();
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down from the keypad total.
    ///
    /// A zero total is rejected and leaves the engine untouched.
    pub fn start(&mut self, scheduler: &mut Scheduler) -> Result<Event, ValidationError> {
        let total = self.keypad.total_secs();
        if total == 0 {
            return Err(ValidationError::InvalidTimerDuration);
        }
        self.remaining_secs = total;
        self.original_secs = total;
        self.state = TimerState::Running;
        scheduler.replace(&mut self.task, TaskOwner::Timer, TIMER_TICK_PERIOD_MS);
        Ok(Event::TimerStarted {
            total_secs: total,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self, scheduler: &mut Scheduler) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        scheduler.clear(&mut self.task);
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self, scheduler: &mut Scheduler) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        scheduler.replace(&mut self.task, TaskOwner::Timer, TIMER_TICK_PERIOD_MS);
        Some(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Pause when running, resume when paused, otherwise nothing.
    pub fn toggle_pause(&mut self, scheduler: &mut Scheduler) -> Option<Event> {
        match self.state {
            TimerState::Running => self.pause(scheduler),
            TimerState::Paused => self.resume(scheduler),
            TimerState::Idle | TimerState::Expired => None,
        }
    }

    pub fn reset(&mut self, scheduler: &mut Scheduler) -> Event {
        scheduler.clear(&mut self.task);
        self.state = TimerState::Idle;
        self.remaining_secs = self.original_secs;
        Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Call when the timer task fires. Returns `Some(Event::TimerExpired)`
    /// on the tick that reaches zero; the task cancels itself there.
    pub fn tick(&mut self, scheduler: &mut Scheduler) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        scheduler.clear(&mut self.task);
        self.state = TimerState::Expired;
        info!(original_secs = self.original_secs, "timer expired");
        Some(Event::TimerExpired { at: Utc::now() })
    }
}
