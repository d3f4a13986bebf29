pub mod classify;
pub mod config;
pub mod replay;
pub mod run;
pub mod weather;

use std::path::Path;

use gyropanel_core::{Config, Event};

/// Config from `--config-file`, or the default location.
pub fn load_config(path: Option<&Path>) -> gyropanel_core::error::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Single-threaded runtime; the widget never leaves the driving thread.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn print_json_lines(events: &[Event]) -> Result<(), serde_json::Error> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
