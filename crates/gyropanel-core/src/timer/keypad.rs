//! Per-unit digit entry for the countdown timer.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_UNIT_DIGITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Hours,
    Minutes,
    Seconds,
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "hours" | "hour" => Ok(TimeUnit::Hours),
            "m" | "minutes" | "minute" | "min" => Ok(TimeUnit::Minutes),
            "s" | "seconds" | "second" | "sec" => Ok(TimeUnit::Seconds),
            other => Err(format!("unknown time unit: {other}")),
        }
    }
}

/// Digits typed so far for each unit, plus the tab currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypad {
    active: TimeUnit,
    hours: String,
    minutes: String,
    seconds: String,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> TimeUnit {
        self.active
    }

    pub fn select(&mut self, unit: TimeUnit) {
        self.active = unit;
    }

    pub fn digits(&self, unit: TimeUnit) -> &str {
        match unit {
            TimeUnit::Hours => &self.hours,
            TimeUnit::Minutes => &self.minutes,
            TimeUnit::Seconds => &self.seconds,
        }
    }

    /// Append a digit to the active unit. Input past two digits is dropped.
    pub fn press(&mut self, digit: char) -> Result<(), ValidationError> {
        if !digit.is_ascii_digit() {
            return Err(ValidationError::InvalidDigit(digit));
        }
        let field = self.active_mut();
        if field.len() < MAX_UNIT_DIGITS {
            field.push(digit);
        }
        Ok(())
    }

    /// Empty the active unit.
    pub fn clear(&mut self) {
        self.active_mut().clear();
    }

    /// Total seconds; an empty unit counts as zero.
    pub fn total_secs(&self) -> u64 {
        let unit = |s: &str| s.parse::<u64>().unwrap_or(0);
        unit(&self.hours) * 3600 + unit(&self.minutes) * 60 + unit(&self.seconds)
    }

    fn active_mut(&mut self) -> &mut String {
        match self.active {
            TimeUnit::Hours => &mut self.hours,
            TimeUnit::Minutes => &mut self.minutes,
            TimeUnit::Seconds => &mut self.seconds,
        }
    }
}
