mod commands;
mod events;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use calgrid_core::CalendarConfig;
use chrono::Weekday;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Render year, month, week and day calendar views from a list of events")]
struct Cli {
    /// Use this config file instead of ~/.config/calgrid/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Months of a year with their event counts
    Year {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Day cells of a month
    Month {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Events of a week packed into rows
    Week {
        #[command(flatten)]
        view: ViewArgs,

        /// Position events at their time of day
        #[arg(long)]
        times: bool,
    },
    /// Events of a single day with their geometry
    Day {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show the config path, creating a default config if none exists
    Config,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Event file (.json, .toml or .ics)
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Date to view (YYYY-MM-DD or YYYY-MM-DDTHH:MM), defaults to today
    #[arg(short, long)]
    date: Option<String>,

    /// Weekdays to hide, e.g. "sat,sun"
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<Weekday>,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => CalendarConfig::config_path()?,
    };

    match cli.command {
        Commands::Config => commands::config::run(&config_path),
        Commands::Year { view } => {
            commands::year::run(&commands::ViewInput::load(&config_path, &view)?)
        }
        Commands::Month { view } => {
            commands::month::run(&commands::ViewInput::load(&config_path, &view)?)
        }
        Commands::Week { view, times } => {
            commands::week::run(&commands::ViewInput::load(&config_path, &view)?, times)
        }
        Commands::Day { view } => {
            commands::day::run(&commands::ViewInput::load(&config_path, &view)?)
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (default "warn").
fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| anyhow!("invalid RUST_LOG filter: {e}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    Ok(())
}
