//! Interactive session.
//!
//! Commands arrive on stdin, the scheduler follows real elapsed time on a
//! 10 ms tick, and weather requests run on spawned tasks whose outcomes come
//! back over a channel. The widget itself stays on the driving thread.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gyropanel_core::{Config, CurrentWeather, OpenMeteoClient, WeatherError, WeatherRequest, Widget};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{load_config, runtime};
use crate::session::{is_blank, Command};
use crate::terminal::{collaborators, Sink, HELP_TEXT};

const TICK: Duration = Duration::from_millis(10);

type Outcome = (WeatherRequest, Result<CurrentWeather, WeatherError>);

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    runtime()?.block_on(session(&config))
}

async fn session(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = Widget::new(config, collaborators(config, Sink::Stdout, None));
    let client = Arc::new(OpenMeteoClient::new(config.weather.endpoint.as_str()));
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK);
    let started = Instant::now();

    println!("{HELP_TEXT}");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                log_events(&widget.run_until(elapsed));
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if is_blank(&line) {
                    continue;
                }
                match line.trim().parse::<Command>() {
                    Ok(Command::Widget(action)) => log_events(&action.apply(&mut widget)),
                    Ok(Command::Status) => {
                        println!("{}", serde_json::to_string_pretty(&widget.snapshot())?);
                    }
                    Ok(Command::Wait(ms)) => tokio::time::sleep(Duration::from_millis(ms)).await,
                    Ok(Command::Clock(_)) => eprintln!("clock can only be pinned during replay"),
                    Ok(Command::Quit) => break,
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some((request, outcome)) = rx.recv() => {
                log_events(&widget.complete_weather(&request, outcome));
            }
        }

        if let Some(request) = widget.take_weather_request() {
            let client = Arc::clone(&client);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = client.fetch(&request).await;
                if tx.send((request, outcome)).is_err() {
                    warn!(seq = request.seq, "session ended before weather arrived");
                }
            });
        }
    }
    Ok(())
}

fn log_events(events: &[gyropanel_core::Event]) {
    for event in events {
        debug!(kind = event.kind(), "event");
    }
}
