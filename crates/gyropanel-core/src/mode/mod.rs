mod rules;
mod selector;

pub use rules::{classify, ClassificationRule, RULES};
pub use selector::{ModeSelector, Observation, DEFAULT_COOLDOWN_MS};

use serde::{Deserialize, Serialize};

/// The single discrete application state that decides which panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    None,
    Compass,
    Alarm,
    Timer,
    Stopwatch,
    Weather,
    Surprise,
}

impl Mode {
    /// Text placed in the mode label and spoken on activation.
    pub fn label(self) -> &'static str {
        match self {
            Mode::None => "",
            Mode::Compass => "🧭 Compass",
            Mode::Alarm => "⏰ Alarm Clock",
            Mode::Timer => "⏱ Timer",
            Mode::Stopwatch => "⏳ Stopwatch",
            Mode::Weather => "🌦 Weather",
            Mode::Surprise => "🎉 Surprise Mode",
        }
    }

    /// Rotation applied to the surface so the panel reads upright.
    pub fn rotation_deg(self) -> u16 {
        match self {
            Mode::Timer => 180,
            _ => 0,
        }
    }

    /// Panel backing this mode, if any.
    pub fn panel(self) -> Option<Panel> {
        match self {
            Mode::None => None,
            Mode::Compass => Some(Panel::Compass),
            Mode::Alarm => Some(Panel::Alarm),
            Mode::Timer => Some(Panel::Timer),
            Mode::Stopwatch => Some(Panel::Stopwatch),
            Mode::Weather => Some(Panel::Weather),
            Mode::Surprise => Some(Panel::Surprise),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::None => "none",
            Mode::Compass => "compass",
            Mode::Alarm => "alarm",
            Mode::Timer => "timer",
            Mode::Stopwatch => "stopwatch",
            Mode::Weather => "weather",
            Mode::Surprise => "surprise",
        };
        f.write_str(name)
    }
}

/// One of the mutually exclusive panels on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Compass,
    Alarm,
    Timer,
    Weather,
    Stopwatch,
    Surprise,
}
