//! The widget controller.
//!
//! Owns every engine plus the shared scheduler and routes sensor input,
//! user controls and task firings to them. Each operation returns the
//! [`Event`]s it produced and renders the result through the [`Surface`].
//! All state is touched from one caller at a time; there are no locks.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collaborators::{
    Alerter, Announcer, Locator, PermissionGate, SoundKind, Surface, TextSlot, WallClock,
};
use crate::error::{ValidationError, WeatherError};
use crate::events::Event;
use crate::mode::{Mode, ModeSelector};
use crate::scheduler::{Scheduler, TaskOwner};
use crate::sensor::{MotionSample, OrientationSample};
use crate::shake::ShakeDetector;
use crate::storage::{Config, Theme};
use crate::timer::{AlarmEngine, Keypad, Stopwatch, TimeUnit, TimerEngine, TimerState};
use crate::weather::{CurrentWeather, LookupStart, WeatherLookup, WeatherRequest, FETCHING_TEXT};

pub const NO_ALARM_TEXT: &str = "No alarm set";
pub const SENSORS_UNAVAILABLE_TEXT: &str = "Motion sensors unavailable";
pub const TIMER_DONE_TEXT: &str = "⏰ Time's up!";

/// External capabilities handed to the widget.
pub struct Collaborators {
    pub surface: Box<dyn Surface>,
    pub announcer: Box<dyn Announcer>,
    pub alerter: Box<dyn Alerter>,
    pub permissions: Box<dyn PermissionGate>,
    pub locator: Box<dyn Locator>,
    pub clock: Box<dyn WallClock>,
}

/// Serializable view of the whole widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub mode: Mode,
    pub now_ms: u64,
    pub theme: Theme,
    pub timer_state: TimerState,
    pub timer_display: String,
    pub stopwatch_display: String,
    pub stopwatch_running: bool,
    pub laps: Vec<u64>,
    pub alarm: Option<String>,
    pub alarm_armed: bool,
    pub weather_fetched: bool,
}

pub struct Widget {
    selector: ModeSelector,
    /// Mode on screen. Differs from the selector's mode only while a shake
    /// surprise is showing.
    displayed: Mode,
    shake: ShakeDetector,
    timer: TimerEngine,
    stopwatch: Stopwatch,
    alarm: AlarmEngine,
    weather: WeatherLookup,
    scheduler: Scheduler,
    theme: Theme,
    voice: bool,
    outgoing_weather: Option<WeatherRequest>,
    io: Collaborators,
}

impl Widget {
    pub fn new(config: &Config, io: Collaborators) -> Self {
        let mut widget = Self {
            selector: ModeSelector::new(config.selector.cooldown_ms),
            displayed: Mode::None,
            shake: ShakeDetector::new(config.shake.threshold),
            timer: TimerEngine::new(),
            stopwatch: Stopwatch::new(),
            alarm: AlarmEngine::new(),
            weather: WeatherLookup::new(),
            scheduler: Scheduler::new(),
            theme: config.ui.theme,
            voice: config.ui.voice,
            outgoing_weather: None,
            io,
        };
        widget.render_initial();
        widget
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.displayed
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn alarm(&self) -> &AlarmEngine {
        &self.alarm
    }

    pub fn weather(&self) -> &WeatherLookup {
        &self.weather
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            mode: self.mode(),
            now_ms: self.now_ms(),
            theme: self.theme,
            timer_state: self.timer.state(),
            timer_display: self.timer.display(),
            stopwatch_display: self.stopwatch.display(),
            stopwatch_running: self.stopwatch.is_running(),
            laps: self.stopwatch.laps().to_vec(),
            alarm: self.alarm.target().map(|t| t.to_string()),
            alarm_armed: self.alarm.is_armed(),
            weather_fetched: self.weather.fetched(),
        }
    }

    // ── Sensors ──────────────────────────────────────────────────────

    pub fn on_orientation(&mut self, sample: &OrientationSample) -> Vec<Event> {
        let observation = self.selector.observe(sample, self.scheduler.now_ms());
        let mut events = Vec::new();

        if let Some(mode) = observation.transition {
            events.push(self.activate(mode));
            if mode == Mode::Weather {
                events.extend(self.trigger_weather(true));
            }
        }
        if let Some(heading_deg) = observation.heading {
            self.io
                .surface
                .set_text(TextSlot::CompassHeading, &format!("Heading: {heading_deg}°"));
            events.push(Event::HeadingUpdated {
                heading_deg,
                at: Utc::now(),
            });
        }
        events
    }

    /// A shake shows surprise mode regardless of the current mode. The
    /// selector is left alone: its cooldown and active mode still describe
    /// the last orientation change, so surprise lasts until the device is
    /// turned to a different mode.
    pub fn on_motion(&mut self, sample: MotionSample) -> Vec<Event> {
        if !self.shake.observe(sample) {
            return Vec::new();
        }
        let changed = self.activate(Mode::Surprise);

        let mut rng = rand::thread_rng();
        let hues = (rng.gen_range(0..=360), rng.gen_range(0..=360));
        self.io.surface.celebrate(hues);
        vec![
            changed,
            Event::SurpriseTriggered {
                hues,
                at: Utc::now(),
            },
        ]
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance virtual time by `delta_ms`, firing due engine tasks in order.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<Event> {
        self.run_until(self.scheduler.now_ms() + delta_ms)
    }

    /// Advance virtual time to the absolute instant `until_ms`.
    pub fn run_until(&mut self, until_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(firing) = self.scheduler.pop_due(until_ms) {
            match firing.owner {
                TaskOwner::Timer => events.extend(self.on_timer_tick()),
                TaskOwner::Stopwatch => self.on_stopwatch_tick(),
                TaskOwner::Alarm => events.extend(self.on_alarm_check()),
            }
        }
        self.scheduler.advance_to(until_ms);
        events
    }

    fn on_timer_tick(&mut self) -> Option<Event> {
        let expired = self.timer.tick(&mut self.scheduler);
        self.render_timer();
        if expired.is_some() {
            self.io.alerter.play_sound(SoundKind::TimerDone);
            self.io.surface.set_text(TextSlot::TimerStatus, TIMER_DONE_TEXT);
            self.io.alerter.acknowledge(TIMER_DONE_TEXT);
        }
        expired
    }

    fn on_stopwatch_tick(&mut self) {
        self.stopwatch.tick();
        self.io
            .surface
            .set_text(TextSlot::StopwatchDisplay, &self.stopwatch.display());
    }

    fn on_alarm_check(&mut self) -> Option<Event> {
        let now = self.io.clock.now();
        let fired = self.alarm.check(now, &mut self.scheduler)?;
        let message = match self.alarm.target() {
            Some(target) => format!("⏰ Alarm! It's {target}"),
            None => "⏰ Alarm!".to_string(),
        };
        self.io.alerter.play_sound(SoundKind::Alarm);
        self.io.surface.set_text(TextSlot::AlarmStatus, &message);
        self.io.alerter.acknowledge(&message);
        Some(fired)
    }

    // ── Timer controls ───────────────────────────────────────────────

    pub fn timer_select_unit(&mut self, unit: TimeUnit) {
        self.timer.select_unit(unit);
        self.render_timer_entry();
    }

    pub fn timer_press_digit(&mut self, digit: char) -> Vec<Event> {
        match self.timer.press_digit(digit) {
            Ok(()) => {
                self.render_timer_entry();
                Vec::new()
            }
            Err(err) => vec![rejected(&err)],
        }
    }

    pub fn timer_clear_digits(&mut self) {
        self.timer.clear_digits();
        self.render_timer_entry();
    }

    pub fn timer_start(&mut self) -> Vec<Event> {
        match self.timer.start(&mut self.scheduler) {
            Ok(event) => {
                self.io.surface.set_text(TextSlot::TimerStatus, "");
                self.render_timer();
                vec![event]
            }
            Err(err) => vec![self.reject(TextSlot::TimerStatus, &err)],
        }
    }

    pub fn timer_toggle_pause(&mut self) -> Vec<Event> {
        let event = self.timer.toggle_pause(&mut self.scheduler);
        self.render_timer();
        event.into_iter().collect()
    }

    pub fn timer_reset(&mut self) -> Vec<Event> {
        let event = self.timer.reset(&mut self.scheduler);
        self.io.surface.set_text(TextSlot::TimerStatus, "");
        self.render_timer();
        vec![event]
    }

    // ── Stopwatch controls ───────────────────────────────────────────

    pub fn stopwatch_start(&mut self) -> Vec<Event> {
        self.stopwatch.start(&mut self.scheduler).into_iter().collect()
    }

    pub fn stopwatch_stop(&mut self) -> Vec<Event> {
        self.stopwatch.stop(&mut self.scheduler).into_iter().collect()
    }

    pub fn stopwatch_lap(&mut self) -> Vec<Event> {
        let event = self.stopwatch.lap();
        self.io.surface.set_laps(&self.stopwatch.lap_lines());
        vec![event]
    }

    pub fn stopwatch_reset(&mut self) -> Vec<Event> {
        let event = self.stopwatch.reset(&mut self.scheduler);
        self.io
            .surface
            .set_text(TextSlot::StopwatchDisplay, &self.stopwatch.display());
        self.io.surface.set_laps(&[]);
        vec![event]
    }

    // ── Alarm controls ───────────────────────────────────────────────

    pub fn alarm_set(&mut self, input: &str) -> Vec<Event> {
        match self.alarm.set(input, &mut self.scheduler) {
            Ok(event) => {
                if let Some(target) = self.alarm.target() {
                    self.io
                        .surface
                        .set_text(TextSlot::AlarmStatus, &format!("Alarm set for {target}"));
                }
                vec![event]
            }
            Err(err) => vec![self.reject(TextSlot::AlarmStatus, &err)],
        }
    }

    pub fn alarm_clear(&mut self) -> Vec<Event> {
        let event = self.alarm.clear(&mut self.scheduler);
        self.io.surface.set_text(TextSlot::AlarmStatus, NO_ALARM_TEXT);
        vec![event]
    }

    // ── Chrome ───────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> Vec<Event> {
        self.theme = self.theme.toggled();
        self.io.surface.set_theme(self.theme);
        vec![Event::ThemeChanged {
            theme: self.theme,
            at: Utc::now(),
        }]
    }

    pub fn show_help(&mut self) {
        self.io.surface.set_help_visible(true);
    }

    /// The one-time consent action on the help overlay. The overlay closes
    /// whatever the answer; a refusal is reported and never retried.
    pub fn enable_sensors(&mut self) -> Vec<Event> {
        let granted = self.io.permissions.request_motion_permission();
        self.io.surface.set_help_visible(false);
        if !granted {
            self.io
                .surface
                .set_text(TextSlot::SensorStatus, SENSORS_UNAVAILABLE_TEXT);
        }
        info!(granted, "sensor permission answered");
        vec![Event::SensorPermission {
            granted,
            at: Utc::now(),
        }]
    }

    // ── Weather ──────────────────────────────────────────────────────

    /// Ask for a weather refresh. When a network request is needed it is
    /// queued for [`Widget::take_weather_request`].
    pub fn trigger_weather(&mut self, force: bool) -> Vec<Event> {
        match self.weather.trigger(force, self.io.locator.as_ref()) {
            LookupStart::Skipped => Vec::new(),
            LookupStart::Failed(err) => vec![self.weather_failed(&err)],
            LookupStart::Request(request) => {
                self.io.surface.set_text(TextSlot::WeatherInfo, FETCHING_TEXT);
                self.outgoing_weather = Some(request);
                vec![Event::WeatherRequested {
                    latitude: request.coordinates.latitude,
                    longitude: request.coordinates.longitude,
                    at: Utc::now(),
                }]
            }
        }
    }

    /// The request the driver should perform next, if any.
    pub fn take_weather_request(&mut self) -> Option<WeatherRequest> {
        self.outgoing_weather.take()
    }

    /// Feed back the outcome of a request obtained from
    /// [`Widget::take_weather_request`].
    pub fn complete_weather(
        &mut self,
        request: &WeatherRequest,
        outcome: Result<CurrentWeather, WeatherError>,
    ) -> Vec<Event> {
        let reading = outcome.as_ref().ok().copied();
        match self.weather.complete(request, outcome) {
            None => {
                debug!(seq = request.seq, "stale weather outcome dropped");
                Vec::new()
            }
            Some(Ok(text)) => {
                self.io.surface.set_text(TextSlot::WeatherInfo, &text);
                reading
                    .map(|current| Event::WeatherUpdated {
                        temperature: current.temperature,
                        windspeed: current.windspeed,
                        at: Utc::now(),
                    })
                    .into_iter()
                    .collect()
            }
            Some(Err(err)) => vec![self.weather_failed(&err)],
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Panel switch, label, rotation and announcement for a new mode.
    fn activate(&mut self, mode: Mode) -> Event {
        self.displayed = mode;
        if let Some(panel) = mode.panel() {
            self.io.surface.show_panel(panel);
        }
        self.io.surface.set_mode_label(mode.label());
        self.io.surface.set_rotation(mode.rotation_deg());
        self.speak(mode.label());
        Event::ModeChanged {
            mode,
            at: Utc::now(),
        }
    }

    fn speak(&mut self, text: &str) {
        if self.voice {
            self.io.announcer.speak(text);
        }
    }

    fn reject(&mut self, slot: TextSlot, err: &ValidationError) -> Event {
        let message = err.to_string();
        self.io.surface.set_text(slot, &message);
        self.speak(&message);
        rejected(err)
    }

    fn weather_failed(&mut self, err: &WeatherError) -> Event {
        let message = err.to_string();
        self.io.surface.set_text(TextSlot::WeatherInfo, &message);
        Event::WeatherFailed {
            message,
            at: Utc::now(),
        }
    }

    fn render_initial(&mut self) {
        self.io.surface.set_theme(self.theme);
        self.render_timer();
        self.render_timer_entry();
        self.io
            .surface
            .set_text(TextSlot::StopwatchDisplay, &self.stopwatch.display());
        self.io.surface.set_laps(&[]);
        self.io.surface.set_text(TextSlot::AlarmStatus, NO_ALARM_TEXT);
    }

    fn render_timer(&mut self) {
        self.io
            .surface
            .set_text(TextSlot::TimerDisplay, &self.timer.display());
        self.io
            .surface
            .set_text(TextSlot::TimerToggleLabel, self.timer.toggle_label());
    }

    fn render_timer_entry(&mut self) {
        let text = entry_text(self.timer.keypad());
        self.io.surface.set_text(TextSlot::TimerEntry, &text);
    }
}

fn rejected(err: &ValidationError) -> Event {
    Event::InputRejected {
        message: err.to_string(),
        at: Utc::now(),
    }
}

/// `HH:MM:SS` built from the typed digits, with the unit being edited.
fn entry_text(keypad: &Keypad) -> String {
    let unit = |u: TimeUnit| format!("{:0>2}", keypad.digits(u));
    let editing = match keypad.active() {
        TimeUnit::Hours => "hours",
        TimeUnit::Minutes => "minutes",
        TimeUnit::Seconds => "seconds",
    };
    format!(
        "{}:{}:{} (editing {editing})",
        unit(TimeUnit::Hours),
        unit(TimeUnit::Minutes),
        unit(TimeUnit::Seconds)
    )
}
