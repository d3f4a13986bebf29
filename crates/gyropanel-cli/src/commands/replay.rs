//! Deterministic replay of a command script.
//!
//! Time only moves on `wait`, in scheduler-sized slices so the pinned wall
//! clock keeps pace with virtual time. Events go to stdout as JSON lines;
//! everything the widget renders goes to stderr.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use chrono::{Local, NaiveTime, TimeDelta};
use gyropanel_core::{Config, Event, OpenMeteoClient, Widget};
use tracing::debug;

use super::{load_config, print_json_lines, runtime};
use crate::session::{is_blank, Command};
use crate::terminal::{collaborators, ScriptClock, Sink};

/// Finest period any engine schedules at.
const SLICE_MS: u64 = 10;
const DAY_MS: u64 = 86_400_000;

pub fn run(config_path: Option<&Path>, script: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let text = std::fs::read_to_string(script)
        .map_err(|e| format!("cannot read {}: {e}", script.display()))?;
    runtime()?.block_on(replay(&config, &text))
}

struct Replay {
    widget: Widget,
    clock: Rc<Cell<NaiveTime>>,
    /// Wall-clock time pinned at a virtual instant.
    anchor: (NaiveTime, u64),
}

impl Replay {
    fn wait(&mut self, ms: u64) -> Vec<Event> {
        let until = self.widget.now_ms() + ms;
        let mut events = Vec::new();
        while self.widget.now_ms() < until {
            let next = (self.widget.now_ms() + SLICE_MS).min(until);
            self.pin_clock(next);
            events.extend(self.widget.run_until(next));
        }
        events
    }

    fn pin_clock(&self, at_ms: u64) {
        let (time, since) = self.anchor;
        let elapsed = (at_ms.saturating_sub(since) % DAY_MS) as i64;
        let (wall, _) = time.overflowing_add_signed(TimeDelta::milliseconds(elapsed));
        self.clock.set(wall);
    }
}

async fn replay(config: &Config, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let start = Local::now().time();
    let clock = Rc::new(Cell::new(start));
    let io = collaborators(config, Sink::Stderr, Some(Box::new(ScriptClock(clock.clone()))));
    let mut session = Replay {
        widget: Widget::new(config, io),
        clock,
        anchor: (start, 0),
    };
    let client = OpenMeteoClient::new(config.weather.endpoint.as_str());

    for (index, line) in text.lines().enumerate() {
        if is_blank(line) {
            continue;
        }
        let command: Command = line
            .trim()
            .parse()
            .map_err(|e| format!("line {}: {e}", index + 1))?;
        debug!(line = index + 1, ?command, "replay");

        let events = match command {
            Command::Widget(action) => action.apply(&mut session.widget),
            Command::Wait(ms) => session.wait(ms),
            Command::Clock(time) => {
                session.anchor = (time, session.widget.now_ms());
                session.clock.set(time);
                Vec::new()
            }
            Command::Status => {
                println!("{}", serde_json::to_string(&session.widget.snapshot())?);
                Vec::new()
            }
            Command::Quit => break,
        };
        print_json_lines(&events)?;

        if let Some(request) = session.widget.take_weather_request() {
            let outcome = client.fetch(&request).await;
            print_json_lines(&session.widget.complete_weather(&request, outcome))?;
        }
    }
    Ok(())
}
