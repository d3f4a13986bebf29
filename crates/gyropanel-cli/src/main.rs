use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;
mod terminal;

#[derive(Parser)]
#[command(name = "gyropanel-cli", version, about = "gyropanel CLI")]
struct Cli {
    /// Use this config file instead of ~/.config/gyropanel/config.toml
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session driven by commands on stdin
    Run,
    /// Replay a command script in virtual time, printing events as JSON lines
    Replay {
        /// Script file, one command per line
        script: PathBuf,
    },
    /// One-shot weather lookup
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// Print the mode an orientation sample selects
    Classify {
        #[arg(allow_negative_numbers = true)]
        alpha: f64,
        #[arg(allow_negative_numbers = true)]
        beta: f64,
        #[arg(allow_negative_numbers = true)]
        gamma: f64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GYROPANEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config_file = cli.config_file.as_deref();
    let result = match cli.command {
        Commands::Run => commands::run::run(config_file),
        Commands::Replay { script } => commands::replay::run(config_file, &script),
        Commands::Weather { lat, lon } => commands::weather::run(config_file, lat, lon),
        Commands::Classify { alpha, beta, gamma } => commands::classify::run(alpha, beta, gamma),
        Commands::Config { action } => commands::config::run(config_file, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
