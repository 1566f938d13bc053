//! Watch command implementation.
//!
//! The watch command:
//! 1. Opens the CSV sink
//! 2. Connects to the live-timing websocket and subscribes
//! 3. Writes one CSV row per qualifying leaderboard row
//! 4. Reconnects forever on reload, close or error

use crate::feed::{supervise, FeedConfig, Subscription};
use crate::output::open_sink;
use crate::parser::Router;
use crate::utils::config::{DEFAULT_FEED_URL, DEFAULT_SCREEN_ID, DEFAULT_TRACK_ID};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the watch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct WatchArgs {
    /// Websocket endpoint URL
    pub url: String,

    /// Track to subscribe to
    pub track_id: u32,

    /// Screen of the track to subscribe to
    pub screen_id: u32,

    /// CSV file to append to (stdout if None)
    pub output: Option<PathBuf>,

    /// Write the column header when the sink opens
    pub header: bool,

    /// Emit the whole leaderboard on every update
    pub all_rows: bool,
}

impl Default for WatchArgs {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            track_id: DEFAULT_TRACK_ID,
            screen_id: DEFAULT_SCREEN_ID,
            output: None,
            header: false,
            all_rows: false,
        }
    }
}

/// Execute the watch command
///
/// **Public** - main entry point called from main.rs
///
/// Only returns on setup failure; the feed loop itself runs until the
/// process is stopped.
pub fn execute_watch(args: WatchArgs) -> Result<()> {
    info!("Watching live timing at {}", args.url);
    info!(
        "Track {} screen {}, {}",
        args.track_id,
        args.screen_id,
        if args.all_rows { "all rows" } else { "lap-completing vehicle only" }
    );

    let mut sink = open_sink(args.output.as_deref(), args.header)
        .context("Failed to open output")?;

    let config = FeedConfig {
        url: args.url,
        subscription: Subscription::new(args.track_id, args.screen_id),
    };
    let router = Router::new(args.all_rows);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(supervise(&config, &router, &mut sink));

    Ok(())
}

/// Validate watch arguments
///
/// **Public** - can be called before execute_watch for early validation
pub fn validate_args(args: &WatchArgs) -> Result<()> {
    if args.url.is_empty() {
        anyhow::bail!("Feed URL cannot be empty");
    }

    if !args.url.starts_with("ws://") && !args.url.starts_with("wss://") {
        anyhow::bail!("Feed URL must start with ws:// or wss://");
    }

    Ok(())
}
