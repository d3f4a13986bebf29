//! Orientation classification table.
//!
//! Rules are evaluated top to bottom and the first match wins. Every bound is
//! exclusive: a sample sitting exactly on 10°, 35°, 45° or 135° does not
//! satisfy the rule that bound belongs to.

use super::Mode;
use crate::sensor::Angles;

/// A predicate over a complete orientation reading and the mode it selects.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub mode: Mode,
    pub name: &'static str,
    pub matches: fn(&Angles) -> bool,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("mode", &self.mode)
            .field("name", &self.name)
            .finish()
    }
}

fn flat(a: &Angles) -> bool {
    a.beta.abs() < 10.0 && a.gamma.abs() < 10.0
}

fn portrait_up(a: &Angles) -> bool {
    a.beta > 45.0 && a.beta < 135.0 && a.gamma.abs() < 35.0
}

fn portrait_down(a: &Angles) -> bool {
    a.beta < -45.0 && a.beta > -135.0 && a.gamma.abs() < 35.0
}

fn landscape_right(a: &Angles) -> bool {
    a.gamma > 45.0
}

fn landscape_left(a: &Angles) -> bool {
    a.gamma < -45.0
}

/// Priority-ordered rule table.
pub const RULES: [ClassificationRule; 5] = [
    ClassificationRule {
        mode: Mode::Compass,
        name: "flat",
        matches: flat,
    },
    ClassificationRule {
        mode: Mode::Alarm,
        name: "portrait-up",
        matches: portrait_up,
    },
    ClassificationRule {
        mode: Mode::Timer,
        name: "portrait-down",
        matches: portrait_down,
    },
    ClassificationRule {
        mode: Mode::Stopwatch,
        name: "landscape-right",
        matches: landscape_right,
    },
    ClassificationRule {
        mode: Mode::Weather,
        name: "landscape-left",
        matches: landscape_left,
    },
];

/// Mode selected by the first matching rule, if any.
pub fn classify(angles: &Angles) -> Option<Mode> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(angles))
        .map(|rule| rule.mode)
}
