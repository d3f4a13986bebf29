use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::storage::Theme;

/// Every state change in the widget produces an Event.
/// The driver prints or forwards them; rendering happens separately through
/// the surface collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ModeChanged {
        mode: Mode,
        at: DateTime<Utc>,
    },
    HeadingUpdated {
        heading_deg: i32,
        at: DateTime<Utc>,
    },
    /// A shake forced surprise mode. Hues seed the background gradient.
    SurpriseTriggered {
        hues: (u16, u16),
        at: DateTime<Utc>,
    },
    TimerStarted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerExpired {
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchStarted {
        elapsed_cs: u64,
        at: DateTime<Utc>,
    },
    StopwatchStopped {
        elapsed_cs: u64,
        at: DateTime<Utc>,
    },
    LapRecorded {
        lap: usize,
        elapsed_cs: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
    AlarmArmed {
        hour: u32,
        minute: u32,
        at: DateTime<Utc>,
    },
    AlarmFired {
        hour: u32,
        minute: u32,
        at: DateTime<Utc>,
    },
    AlarmCleared {
        at: DateTime<Utc>,
    },
    /// User input was refused; `message` is the inline status shown.
    InputRejected {
        message: String,
        at: DateTime<Utc>,
    },
    WeatherRequested {
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    },
    WeatherUpdated {
        temperature: f64,
        windspeed: f64,
        at: DateTime<Utc>,
    },
    WeatherFailed {
        message: String,
        at: DateTime<Utc>,
    },
    ThemeChanged {
        theme: Theme,
        at: DateTime<Utc>,
    },
    SensorPermission {
        granted: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, for logs and terse output.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ModeChanged { .. } => "mode_changed",
            Event::HeadingUpdated { .. } => "heading_updated",
            Event::SurpriseTriggered { .. } => "surprise_triggered",
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerExpired { .. } => "timer_expired",
            Event::TimerReset { .. } => "timer_reset",
            Event::StopwatchStarted { .. } => "stopwatch_started",
            Event::StopwatchStopped { .. } => "stopwatch_stopped",
            Event::LapRecorded { .. } => "lap_recorded",
            Event::StopwatchReset { .. } => "stopwatch_reset",
            Event::AlarmArmed { .. } => "alarm_armed",
            Event::AlarmFired { .. } => "alarm_fired",
            Event::AlarmCleared { .. } => "alarm_cleared",
            Event::InputRejected { .. } => "input_rejected",
            Event::WeatherRequested { .. } => "weather_requested",
            Event::WeatherUpdated { .. } => "weather_updated",
            Event::WeatherFailed { .. } => "weather_failed",
            Event::ThemeChanged { .. } => "theme_changed",
            Event::SensorPermission { .. } => "sensor_permission",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::ModeChanged {
            mode: Mode::Stopwatch,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ModeChanged");
        assert_eq!(json["mode"], "stopwatch");
        assert_eq!(event.kind(), "mode_changed");
    }
}
