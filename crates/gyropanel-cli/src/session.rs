//! Line-oriented command language shared by `run` and `replay`.

use std::str::FromStr;

use chrono::NaiveTime;
use gyropanel_core::{Event, MotionSample, OrientationSample, TimeUnit, Widget};

/// Something the widget itself handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Orient(OrientationSample),
    Motion(MotionSample),
    TimerUnit(TimeUnit),
    TimerDigit(char),
    TimerClear,
    TimerStart,
    TimerPause,
    TimerReset,
    StopwatchStart,
    StopwatchStop,
    StopwatchLap,
    StopwatchReset,
    AlarmSet(String),
    AlarmClear,
    Theme,
    Help,
    EnableSensors,
    Weather,
}

impl Action {
    pub fn apply(&self, widget: &mut Widget) -> Vec<Event> {
        match self {
            Action::Orient(sample) => widget.on_orientation(sample),
            Action::Motion(sample) => widget.on_motion(*sample),
            Action::TimerUnit(unit) => {
                widget.timer_select_unit(*unit);
                Vec::new()
            }
            Action::TimerDigit(digit) => widget.timer_press_digit(*digit),
            Action::TimerClear => {
                widget.timer_clear_digits();
                Vec::new()
            }
            Action::TimerStart => widget.timer_start(),
            Action::TimerPause => widget.timer_toggle_pause(),
            Action::TimerReset => widget.timer_reset(),
            Action::StopwatchStart => widget.stopwatch_start(),
            Action::StopwatchStop => widget.stopwatch_stop(),
            Action::StopwatchLap => widget.stopwatch_lap(),
            Action::StopwatchReset => widget.stopwatch_reset(),
            Action::AlarmSet(input) => widget.alarm_set(input),
            Action::AlarmClear => widget.alarm_clear(),
            Action::Theme => widget.toggle_theme(),
            Action::Help => {
                widget.show_help();
                Vec::new()
            }
            Action::EnableSensors => widget.enable_sensors(),
            Action::Weather => widget.trigger_weather(true),
        }
    }
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Widget(Action),
    /// Let this many milliseconds pass.
    Wait(u64),
    /// Pin the wall clock (replay only).
    Clock(NaiveTime),
    /// Print a snapshot of the widget.
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let action = |a: Action| Ok(Command::Widget(a));
        match words.as_slice() {
            ["orient", a, b, g] => action(Action::Orient(OrientationSample {
                alpha: angle(a)?,
                beta: angle(b)?,
                gamma: angle(g)?,
            })),
            ["motion", x, y, z] => action(Action::Motion(MotionSample::new(
                number(x)?,
                number(y)?,
                number(z)?,
            ))),
            ["timer", "unit", unit] => action(Action::TimerUnit(unit.parse()?)),
            ["timer", "digit", d] => {
                let mut chars = d.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => action(Action::TimerDigit(c)),
                    _ => Err(format!("expected a single digit, got '{d}'")),
                }
            }
            ["timer", "clear"] => action(Action::TimerClear),
            ["timer", "start"] => action(Action::TimerStart),
            ["timer", "pause"] => action(Action::TimerPause),
            ["timer", "reset"] => action(Action::TimerReset),
            ["stopwatch", "start"] => action(Action::StopwatchStart),
            ["stopwatch", "stop"] => action(Action::StopwatchStop),
            ["stopwatch", "lap"] => action(Action::StopwatchLap),
            ["stopwatch", "reset"] => action(Action::StopwatchReset),
            ["alarm", "set"] => action(Action::AlarmSet(String::new())),
            ["alarm", "set", time] => action(Action::AlarmSet((*time).to_string())),
            ["alarm", "clear"] => action(Action::AlarmClear),
            ["theme"] => action(Action::Theme),
            ["help"] => action(Action::Help),
            ["enable-sensors"] => action(Action::EnableSensors),
            ["weather"] => action(Action::Weather),
            ["wait", ms] => ms
                .parse()
                .map(Command::Wait)
                .map_err(|_| format!("invalid wait duration: {ms}")),
            ["clock", time] => NaiveTime::parse_from_str(time, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
                .map(Command::Clock)
                .map_err(|_| format!("invalid clock time: {time}")),
            ["status"] => Ok(Command::Status),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            [] => Err("empty command".into()),
            _ => Err(format!("unknown command: {line}")),
        }
    }
}

/// `-` stands for an angle the platform did not report.
fn angle(word: &str) -> Result<Option<f64>, String> {
    if word == "-" {
        Ok(None)
    } else {
        number(word).map(Some)
    }
}

fn number(word: &str) -> Result<f64, String> {
    word.parse().map_err(|_| format!("not a number: {word}"))
}

/// Blank lines and `#` comments carry no command.
pub fn is_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}
