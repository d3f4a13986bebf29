//! Capabilities the widget calls but does not implement.
//!
//! Rendering, speech, sound, permissions, location and wall-clock time are
//! all behind these traits, so the engines run headless in tests and the
//! CLI can plug in a terminal rendition.

use chrono::{Local, NaiveTime};

use crate::error::WeatherError;
use crate::mode::Panel;
use crate::storage::Theme;
use crate::weather::Coordinates;

/// Text regions on the surface that the widget rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    CompassHeading,
    TimerDisplay,
    TimerEntry,
    TimerStatus,
    TimerToggleLabel,
    StopwatchDisplay,
    AlarmStatus,
    WeatherInfo,
    SensorStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    TimerDone,
    Alarm,
}

/// The on-screen surface. Exactly one panel is visible at a time.
pub trait Surface {
    /// Hide every panel except `panel`.
    fn show_panel(&mut self, panel: Panel);

    fn set_mode_label(&mut self, text: &str);

    fn set_text(&mut self, slot: TextSlot, text: &str);

    /// Replace the stopwatch lap list.
    fn set_laps(&mut self, lines: &[String]);

    fn set_rotation(&mut self, _degrees: u16) {}

    /// Start the surprise effect with a two-hue background gradient.
    fn celebrate(&mut self, _hues: (u16, u16)) {}

    fn set_theme(&mut self, _theme: Theme) {}

    fn set_help_visible(&mut self, _visible: bool) {}
}

/// Speech output. Fire-and-forget; a new utterance cancels the previous one.
pub trait Announcer {
    fn speak(&mut self, text: &str);
}

/// Sound playback plus the acknowledgement prompt shown with it.
pub trait Alerter {
    fn play_sound(&mut self, kind: SoundKind);

    fn acknowledge(&mut self, message: &str);
}

/// Runtime permission for the motion/orientation sensors.
pub trait PermissionGate {
    /// `true` when granted. Refusal must leave the caller operable.
    fn request_motion_permission(&mut self) -> bool;
}

/// Device position source for the weather lookup.
pub trait Locator {
    fn current_position(&self) -> Result<Coordinates, WeatherError>;
}

/// Local wall-clock time of day, used by the alarm.
pub trait WallClock {
    fn now(&self) -> NaiveTime;
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Position taken from configuration rather than a positioning service.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocator {
    pub coordinates: Option<Coordinates>,
    pub permitted: bool,
}

impl Locator for StaticLocator {
    fn current_position(&self) -> Result<Coordinates, WeatherError> {
        let coordinates = self
            .coordinates
            .ok_or(WeatherError::GeolocationUnsupported)?;
        if !self.permitted {
            return Err(WeatherError::PermissionDenied);
        }
        Ok(coordinates)
    }
}

/// Grants or refuses every request with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub bool);

impl PermissionGate for FixedPermission {
    fn request_motion_permission(&mut self) -> bool {
        self.0
    }
}
