//! # gyropanel Core Library
//!
//! Core logic for a mode-switching utility widget whose visible panel follows
//! the orientation of the device: flat shows a compass, portrait up an alarm
//! clock, portrait down a countdown timer, landscape right a stopwatch,
//! landscape left the weather, and a shake throws a surprise.
//!
//! ## Architecture
//!
//! - **Mode Selector**: rule-table classification with a transition cooldown
//! - **Engines**: timer, stopwatch and alarm, each owning at most one
//!   periodic task on a shared single-threaded [`Scheduler`]
//! - **Collaborators**: rendering, speech, sound, permissions, location and
//!   wall-clock time are traits, so everything runs headless
//! - **Weather**: a retryable lookup plus an Open-Meteo HTTP client
//!
//! ## Key Components
//!
//! - [`Widget`]: controller wiring engines to collaborators
//! - [`ModeSelector`]: debounced orientation-to-mode state machine
//! - [`TimerEngine`], [`Stopwatch`], [`AlarmEngine`]: timing engines
//! - [`Config`]: application configuration management

pub mod collaborators;
pub mod error;
pub mod events;
pub mod mode;
pub mod scheduler;
pub mod sensor;
pub mod shake;
pub mod storage;
pub mod timer;
pub mod weather;
pub mod widget;

pub use collaborators::{
    Alerter, Announcer, FixedPermission, Locator, PermissionGate, SoundKind, StaticLocator,
    Surface, SystemClock, TextSlot, WallClock,
};
pub use error::{ConfigError, CoreError, ValidationError, WeatherError};
pub use events::Event;
pub use mode::{classify, Mode, ModeSelector, Observation, Panel};
pub use scheduler::{Scheduler, TaskId, TaskOwner};
pub use sensor::{Angles, MotionSample, OrientationSample};
pub use shake::ShakeDetector;
pub use storage::{Config, Theme};
pub use timer::{AlarmEngine, AlarmTime, Stopwatch, TimeUnit, TimerEngine, TimerState};
pub use weather::{Coordinates, CurrentWeather, OpenMeteoClient, WeatherLookup, WeatherRequest};
pub use widget::{Collaborators, Widget, WidgetSnapshot};
