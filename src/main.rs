//! Kart Timing CLI
//!
//! Connects to a go-kart live-timing feed and writes leaderboard updates
//! as CSV rows.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::PathBuf;

use kart_timing::commands::{
    display_schema, display_version, execute_replay, execute_watch, validate_args, ReplayArgs,
    WatchArgs,
};
use kart_timing::utils::config::{DEFAULT_FEED_URL, DEFAULT_SCREEN_ID, DEFAULT_TRACK_ID};

/// Kart Timing - live-timing feed recorder
#[derive(Parser, Debug)]
#[command(name = "kart-timing")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, env = "KART_TIMING_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Record the live feed
    Watch {
        /// Websocket endpoint URL
        #[arg(short, long, env = "KART_TIMING_URL", default_value = DEFAULT_FEED_URL)]
        url: String,

        /// Track to subscribe to
        #[arg(long, env = "KART_TIMING_TRACK_ID", default_value_t = DEFAULT_TRACK_ID)]
        track_id: u32,

        /// Screen to subscribe to
        #[arg(long, env = "KART_TIMING_SCREEN_ID", default_value_t = DEFAULT_SCREEN_ID)]
        screen_id: u32,

        /// CSV file to append to (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the column header first
        #[arg(long)]
        header: bool,

        /// Emit the whole leaderboard on every update
        #[arg(long)]
        all: bool,
    },

    /// Convert recorded frames (one JSON message per line) to CSV
    Replay {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// CSV file to append to (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the column header first
        #[arg(long)]
        header: bool,

        /// Emit the whole leaderboard on every update
        #[arg(long)]
        all: bool,
    },

    /// Display the CSV column layout
    Schema,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    // Execute command
    match cli.command {
        Commands::Watch {
            url,
            track_id,
            screen_id,
            output,
            header,
            all,
        } => {
            let args = WatchArgs {
                url,
                track_id,
                screen_id,
                output,
                header,
                all_rows: all,
            };

            // Validate args first
            validate_args(&args)?;

            execute_watch(args)?;
        }

        Commands::Replay {
            input,
            output,
            header,
            all,
        } => {
            execute_replay(ReplayArgs {
                input,
                output,
                header,
                all_rows: all,
            })?;
        }

        Commands::Schema => {
            display_schema();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Configure env_logger, optionally appending to a log file
///
/// **Private** - internal setup
fn init_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(log_level));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
