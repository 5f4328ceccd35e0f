//! requisite-sim - drives a Requisite session without a game client.
//!
//! Registers a few demo keybinds and HUD elements against a configuration
//! file, feeds queued chat messages through the tick loop, and prints what
//! the client would have sent and drawn.

mod commands;

use clap::{Parser, Subcommand};
use requisite_core::RequisiteConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Simulate a Requisite client session")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tick loop against a configuration file
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value_t = 40)]
        ticks: u32,
        /// Chat message to queue (repeatable)
        #[arg(short, long = "message")]
        messages: Vec<String>,
        /// Delay in ticks for queued messages
        #[arg(short, long)]
        delay: Option<u32>,
        /// Count each message's delay from when it was queued
        #[arg(long)]
        per_entry: bool,
        /// Simulate a client with no player session
        #[arg(long)]
        offline: bool,
        /// Key code pressed on the first tick (repeatable)
        #[arg(long = "press")]
        presses: Vec<i32>,
    },
    /// Print a configuration file
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(default_filter: Option<&str>) {
    let builder = EnvFilter::builder().with_default_directive(tracing::Level::INFO.into());
    let filter = match (std::env::var(EnvFilter::DEFAULT_ENV), default_filter) {
        (Err(_), Some(directives)) => builder.parse_lossy(directives),
        _ => builder.from_env_lossy(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let loaded = RequisiteConfig::load();
    let log_filter = loaded.as_ref().ok().and_then(|s| s.log_filter.clone());
    init_logging(log_filter.as_deref());
    let settings = RequisiteConfig::or_default(loaded);

    match cli.command {
        Commands::Simulate {
            config,
            ticks,
            messages,
            delay,
            per_entry,
            offline,
            presses,
        } => {
            let options = commands::SimulateOptions {
                ticks,
                messages,
                presses,
                offline,
            };
            let settings = commands::apply_overrides(settings, config, delay, per_entry);
            commands::simulate(&settings, options)
        }
        Commands::Show { config } => {
            let settings = commands::apply_overrides(settings, config, None, false);
            commands::show(&settings)
        }
    }
}
