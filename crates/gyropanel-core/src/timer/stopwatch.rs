//! Count-up stopwatch with laps.
//!
//! One centisecond is added per 10 ms task firing. Laps are verbatim
//! snapshots of the elapsed count, numbered from 1.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::format_centis;
use crate::events::Event;
use crate::scheduler::{Scheduler, TaskId, TaskOwner};

pub const STOPWATCH_TICK_PERIOD_MS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_cs: u64,
    laps: Vec<u64>,
    #[serde(skip)]
    task: Option<TaskId>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_cs(&self) -> u64 {
        self.elapsed_cs
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn display(&self) -> String {
        format_centis(self.elapsed_cs)
    }

    /// `Lap N: MM:SS.CC` lines in recording order.
    pub fn lap_lines(&self) -> Vec<String> {
        self.laps
            .iter()
            .enumerate()
            .map(|(i, cs)| format!("Lap {}: {}", i + 1, format_centis(*cs)))
            .collect()
    }

    /// No-op while already running.
    pub fn start(&mut self, scheduler: &mut Scheduler) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        scheduler.replace(&mut self.task, TaskOwner::Stopwatch, STOPWATCH_TICK_PERIOD_MS);
        Some(Event::StopwatchStarted {
            elapsed_cs: self.elapsed_cs,
            at: Utc::now(),
        })
    }

    /// Halt counting, keeping elapsed and laps.
    pub fn stop(&mut self, scheduler: &mut Scheduler) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        scheduler.clear(&mut self.task);
        Some(Event::StopwatchStopped {
            elapsed_cs: self.elapsed_cs,
            at: Utc::now(),
        })
    }

    pub fn lap(&mut self) -> Event {
        self.laps.push(self.elapsed_cs);
        Event::LapRecorded {
            lap: self.laps.len(),
            elapsed_cs: self.elapsed_cs,
            at: Utc::now(),
        }
    }

    pub fn reset(&mut self, scheduler: &mut Scheduler) -> Event {
        scheduler.clear(&mut self.task);
        self.elapsed_cs = 0;
        self.laps.clear();
        Event::StopwatchReset { at: Utc::now() }
    }

    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_cs += 1;
        }
    }
}
