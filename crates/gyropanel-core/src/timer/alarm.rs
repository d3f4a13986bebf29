//! Time-of-day alarm.
//!
//! An armed alarm polls the wall clock once a second and fires on an exact
//! hour/minute match. Firing disarms it; only one alarm exists at a time.

use chrono::{NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ValidationError;
use crate::events::Event;
use crate::scheduler::{Scheduler, TaskId, TaskOwner};

pub const ALARM_CHECK_PERIOD_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmTime {
    pub hour: u32,
    pub minute: u32,
}

impl AlarmTime {
    pub fn matches(&self, now: NaiveTime) -> bool {
        now.hour() == self.hour && now.minute() == self.minute
    }
}

impl std::fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for AlarmTime {
    type Err = ValidationError;

    /// Parses the `HH:MM` value of a time input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::EmptyAlarmTime);
        }
        let invalid = || ValidationError::InvalidAlarmTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmEngine {
    target: Option<AlarmTime>,
    #[serde(skip)]
    task: Option<TaskId>,
}

impl AlarmEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<AlarmTime> {
        self.target
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Arm for `input` (`HH:MM`), replacing any armed alarm.
    pub fn set(&mut self, input: &str, scheduler: &mut Scheduler) -> Result<Event, ValidationError> {
        let target: AlarmTime = input.parse()?;
        self.target = Some(target);
        scheduler.replace(&mut self.task, TaskOwner::Alarm, ALARM_CHECK_PERIOD_MS);
        Ok(Event::AlarmArmed {
            hour: target.hour,
            minute: target.minute,
            at: Utc::now(),
        })
    }

    pub fn clear(&mut self, scheduler: &mut Scheduler) -> Event {
        scheduler.clear(&mut self.task);
        self.target = None;
        Event::AlarmCleared { at: Utc::now() }
    }

    /// Called when the check task fires with the current wall-clock time.
    pub fn check(&mut self, now: NaiveTime, scheduler: &mut Scheduler) -> Option<Event> {
        if !self.is_armed() {
            return None;
        }
        let target = self.target?;
        if !target.matches(now) {
            return None;
        }
        scheduler.clear(&mut self.task);
        info!(%target, "alarm fired");
        Some(Event::AlarmFired {
            hour: target.hour,
            minute: target.minute,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_time_input() {
        assert_eq!(
            "07:05".parse::<AlarmTime>(),
            Ok(AlarmTime { hour: 7, minute: 5 })
        );
        assert_eq!("".parse::<AlarmTime>(), Err(ValidationError::EmptyAlarmTime));
        assert_eq!("  ".parse::<AlarmTime>(), Err(ValidationError::EmptyAlarmTime));
        assert!("24:00".parse::<AlarmTime>().is_err());
        assert!("7".parse::<AlarmTime>().is_err());
    }

    #[test]
    fn empty_input_does_not_arm() {
        let mut scheduler = Scheduler::new();
        let mut alarm = AlarmEngine::new();
        assert!(alarm.set("", &mut scheduler).is_err());
        assert!(!alarm.is_armed());
        assert_eq!(scheduler.live_tasks(TaskOwner::Alarm), 0);
    }

    #[test]
    fn fires_once_then_disarms() {
        let mut scheduler = Scheduler::new();
        let mut alarm = AlarmEngine::new();
        alarm.set("00:00", &mut scheduler).unwrap();
        assert!(alarm.check(hm(0, 0), &mut scheduler).is_some());
        assert!(!alarm.is_armed());
        assert!(alarm.check(hm(0, 0), &mut scheduler).is_none());
        assert_eq!(scheduler.live_tasks(TaskOwner::Alarm), 0);
    }

    #[test]
    fn non_matching_minute_keeps_polling() {
        let mut scheduler = Scheduler::new();
        let mut alarm = AlarmEngine::new();
        alarm.set("06:30", &mut scheduler).unwrap();
        assert!(alarm.check(hm(6, 29), &mut scheduler).is_none());
        assert!(alarm.is_armed());
    }

    #[test]
    fn rearming_replaces_previous_alarm() {
        let mut scheduler = Scheduler::new();
        let mut alarm = AlarmEngine::new();
        alarm.set("06:30", &mut scheduler).unwrap();
        alarm.set("07:45", &mut scheduler).unwrap();
        assert_eq!(scheduler.live_tasks(TaskOwner::Alarm), 1);
        assert!(alarm.check(hm(6, 30), &mut scheduler).is_none());
        assert!(alarm.check(hm(7, 45), &mut scheduler).is_some());
    }

    #[test]
    fn clear_stops_polling() {
        let mut scheduler = Scheduler::new();
        let mut alarm = AlarmEngine::new();
        alarm.set("06:30", &mut scheduler).unwrap();
        alarm.clear(&mut scheduler);
        assert!(!alarm.is_armed());
        assert_eq!(alarm.target(), None);
        assert_eq!(scheduler.live_tasks(TaskOwner::Alarm), 0);
    }

    #[test]
    fn fired_alarm_keeps_target_until_cleared() {
        let mut scheduler = Scheduler::new();
        let mut alarm = AlarmEngine::new();
        alarm.set("00:00", &mut scheduler).unwrap();
        alarm.check(hm(0, 0), &mut scheduler);
        assert_eq!(alarm.target(), Some(AlarmTime { hour: 0, minute: 0 }));
        alarm.clear(&mut scheduler);
        assert_eq!(alarm.target(), None);
    }
}
