//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveTime;
use gyropanel_core::{
    Alerter, Announcer, Collaborators, Config, Coordinates, FixedPermission, Panel, SoundKind,
    StaticLocator, Surface, TextSlot, Theme, WallClock, Widget,
};

#[derive(Debug, Default)]
pub struct Recording {
    pub panels: Vec<Panel>,
    pub labels: Vec<String>,
    pub spoken: Vec<String>,
    pub texts: HashMap<TextSlot, String>,
    pub laps: Vec<String>,
    pub rotations: Vec<u16>,
    pub celebrations: Vec<(u16, u16)>,
    pub sounds: Vec<SoundKind>,
    pub prompts: Vec<String>,
    pub theme: Option<Theme>,
    pub help_visible: Option<bool>,
}

impl Recording {
    pub fn text(&self, slot: TextSlot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn visible_panel(&self) -> Option<Panel> {
        self.panels.last().copied()
    }
}

pub type Shared = Rc<RefCell<Recording>>;

struct RecordingSurface(Shared);

impl Surface for RecordingSurface {
    fn show_panel(&mut self, panel: Panel) {
        self.0.borrow_mut().panels.push(panel);
    }

    fn set_mode_label(&mut self, text: &str) {
        self.0.borrow_mut().labels.push(text.to_string());
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.0.borrow_mut().texts.insert(slot, text.to_string());
    }

    fn set_laps(&mut self, lines: &[String]) {
        self.0.borrow_mut().laps = lines.to_vec();
    }

    fn set_rotation(&mut self, degrees: u16) {
        self.0.borrow_mut().rotations.push(degrees);
    }

    fn celebrate(&mut self, hues: (u16, u16)) {
        self.0.borrow_mut().celebrations.push(hues);
    }

    fn set_theme(&mut self, theme: Theme) {
        self.0.borrow_mut().theme = Some(theme);
    }

    fn set_help_visible(&mut self, visible: bool) {
        self.0.borrow_mut().help_visible = Some(visible);
    }
}

struct RecordingVoice(Shared);

impl Announcer for RecordingVoice {
    fn speak(&mut self, text: &str) {
        self.0.borrow_mut().spoken.push(text.to_string());
    }
}

struct RecordingAlerts(Shared);

impl Alerter for RecordingAlerts {
    fn play_sound(&mut self, kind: SoundKind) {
        self.0.borrow_mut().sounds.push(kind);
    }

    fn acknowledge(&mut self, message: &str) {
        self.0.borrow_mut().prompts.push(message.to_string());
    }
}

/// Wall clock the test moves by hand.
#[derive(Clone)]
pub struct ManualClock(pub Rc<Cell<NaiveTime>>);

impl WallClock for ManualClock {
    fn now(&self) -> NaiveTime {
        self.0.get()
    }
}

pub struct Harness {
    pub widget: Widget,
    pub log: Shared,
    pub clock: Rc<Cell<NaiveTime>>,
}

pub const HERE: Coordinates = Coordinates {
    latitude: 40.4168,
    longitude: -3.7038,
};

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn harness() -> Harness {
    harness_with(&Config::default(), Some(HERE), true)
}

pub fn harness_with(config: &Config, location: Option<Coordinates>, granted: bool) -> Harness {
    let log: Shared = Rc::new(RefCell::new(Recording::default()));
    let clock = Rc::new(Cell::new(hm(12, 0)));
    let io = Collaborators {
        surface: Box::new(RecordingSurface(log.clone())),
        announcer: Box::new(RecordingVoice(log.clone())),
        alerter: Box::new(RecordingAlerts(log.clone())),
        permissions: Box::new(FixedPermission(granted)),
        locator: Box::new(StaticLocator {
            coordinates: location,
            permitted: true,
        }),
        clock: Box::new(ManualClock(clock.clone())),
    };
    Harness {
        widget: Widget::new(config, io),
        log,
        clock,
    }
}
