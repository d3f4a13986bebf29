//! Terminal rendition of the widget's collaborators.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveTime;
use gyropanel_core::{
    Alerter, Announcer, Collaborators, Config, FixedPermission, Panel, SoundKind, StaticLocator,
    Surface, SystemClock, TextSlot, Theme, WallClock,
};

/// Where collaborator output goes. Replay keeps stdout for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    Stderr,
}

impl Sink {
    fn line(self, text: &str) {
        match self {
            Sink::Stdout => println!("{text}"),
            Sink::Stderr => eprintln!("{text}"),
        }
    }
}

pub struct TerminalSurface {
    sink: Sink,
    shown: HashMap<TextSlot, String>,
}

impl TerminalSurface {
    pub fn new(sink: Sink) -> Self {
        Self {
            sink,
            shown: HashMap::new(),
        }
    }
}

impl Surface for TerminalSurface {
    fn show_panel(&mut self, panel: Panel) {
        self.sink.line(&format!("[panel] {panel:?}"));
    }

    fn set_mode_label(&mut self, text: &str) {
        self.sink.line(&format!("[mode] {text}"));
    }

    /// Prints a slot only when its text changes; the running displays are
    /// left to `status` so they do not flood the terminal.
    fn set_text(&mut self, slot: TextSlot, text: &str) {
        if matches!(slot, TextSlot::StopwatchDisplay | TextSlot::TimerDisplay) {
            return;
        }
        if self.shown.get(&slot).map(String::as_str) == Some(text) {
            return;
        }
        self.shown.insert(slot, text.to_string());
        if !text.is_empty() {
            self.sink.line(&format!("[{slot:?}] {text}"));
        }
    }

    fn set_laps(&mut self, lines: &[String]) {
        if let Some(last) = lines.last() {
            self.sink.line(&format!("[lap] {last}"));
        }
    }

    fn set_rotation(&mut self, degrees: u16) {
        if degrees != 0 {
            self.sink.line(&format!("[rotate] {degrees}°"));
        }
    }

    fn celebrate(&mut self, hues: (u16, u16)) {
        self.sink
            .line(&format!("🎉 Surprise! gradient {}° → {}°", hues.0, hues.1));
    }

    fn set_theme(&mut self, theme: Theme) {
        self.sink.line(&format!("[theme] {theme:?}"));
    }

    fn set_help_visible(&mut self, visible: bool) {
        if visible {
            self.sink.line(HELP_TEXT);
        }
    }
}

pub struct TerminalVoice(pub Sink);

impl Announcer for TerminalVoice {
    fn speak(&mut self, text: &str) {
        self.0.line(&format!("🔊 {text}"));
    }
}

pub struct TerminalAlerts(pub Sink);

impl Alerter for TerminalAlerts {
    fn play_sound(&mut self, kind: SoundKind) {
        let name = match kind {
            SoundKind::TimerDone => "timer",
            SoundKind::Alarm => "alarm",
        };
        self.0.line(&format!("\u{7}🔔 {name}"));
    }

    fn acknowledge(&mut self, message: &str) {
        self.0.line(&format!("[!] {message}"));
    }
}

/// Wall clock pinned by the replay driver.
#[derive(Clone)]
pub struct ScriptClock(pub Rc<Cell<NaiveTime>>);

impl WallClock for ScriptClock {
    fn now(&self) -> NaiveTime {
        self.0.get()
    }
}

/// Collaborators for a terminal session. `clock` defaults to local time.
pub fn collaborators(
    config: &Config,
    sink: Sink,
    clock: Option<Box<dyn WallClock>>,
) -> Collaborators {
    Collaborators {
        surface: Box::new(TerminalSurface::new(sink)),
        announcer: Box::new(TerminalVoice(sink)),
        alerter: Box::new(TerminalAlerts(sink)),
        permissions: Box::new(FixedPermission(config.ui.sensors_permission)),
        locator: Box::new(StaticLocator {
            coordinates: config.weather.coordinates(),
            permitted: config.weather.location_permission,
        }),
        clock: clock.unwrap_or_else(|| Box::new(SystemClock)),
    }
}

pub const HELP_TEXT: &str = "\
Hold the device to pick a panel:
  flat             compass
  portrait up      alarm clock
  portrait down    timer
  landscape right  stopwatch
  landscape left   weather
  shake            surprise

Commands:
  orient A B G | motion X Y Z
  timer unit h|m|s | timer digit D | timer clear | timer start|pause|reset
  stopwatch start|stop|lap|reset
  alarm set HH:MM | alarm clear
  theme | help | enable-sensors | weather | status | wait MS | quit";
