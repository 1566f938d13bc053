//! Replay command implementation.
//!
//! Feeds recorded frames (one JSON message per line) through the same
//! routing as the live session, without a network connection.

use crate::feed::process_frame;
use crate::output::{open_sink, CsvSink};
use crate::parser::{RouteOutcome, Router};
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// Arguments for the replay command
#[derive(Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Recorded frames; stdin if None
    pub input: Option<PathBuf>,

    /// CSV file to append to (stdout if None)
    pub output: Option<PathBuf>,

    /// Write the column header when the sink opens
    pub header: bool,

    /// Emit the whole leaderboard on every update
    pub all_rows: bool,
}

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: u64,
    pub undecodable: u64,
    pub reloads: u64,
    pub unknown: u64,
    pub records: u64,
}

/// Execute the replay command
///
/// **Public** - main entry point called from main.rs
pub fn execute_replay(args: ReplayArgs) -> Result<ReplayStats> {
    let mut sink = open_sink(args.output.as_deref(), args.header)
        .context("Failed to open output")?;
    let router = Router::new(args.all_rows);

    let stats = match &args.input {
        Some(path) => {
            info!("Replaying frames from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay_frames(BufReader::new(file), &router, &mut sink)?
        }
        None => {
            info!("Replaying frames from stdin");
            replay_frames(std::io::stdin().lock(), &router, &mut sink)?
        }
    };

    info!(
        "Replayed {} frames: {} records, {} reloads, {} unknown, {} undecodable",
        stats.frames, stats.records, stats.reloads, stats.unknown, stats.undecodable
    );

    Ok(stats)
}

/// Route every non-blank line of `reader` into `sink`
///
/// **Public** - used by execute_replay and tests
///
/// Reload messages are counted and skipped; there is no session to restart.
pub fn replay_frames<R: BufRead, W: Write>(
    reader: R,
    router: &Router,
    sink: &mut CsvSink<W>,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        stats.frames += 1;

        match process_frame(&line, router, sink).context("Failed to write record")? {
            None => stats.undecodable += 1,
            Some(RouteOutcome::Reload) => stats.reloads += 1,
            Some(RouteOutcome::Unknown) => stats.unknown += 1,
            Some(RouteOutcome::Results(n)) => stats.records += n as u64,
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_replay_counts() {
        let input = concat!(
            r#"{"results": "<tr data-race-vehicle-id=\"1\"></tr><tr data-race-vehicle-id=\"2\"></tr>", "raceVehicleId": 2}"#,
            "\n",
            "\n",
            r#"{"reload": 1}"#,
            "\n",
            "garbage\n",
            r#"{"hello": "world"}"#,
            "\n",
        );

        let mut sink = CsvSink::new(Vec::new());
        let stats = replay_frames(Cursor::new(input), &Router::default(), &mut sink).unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                frames: 4,
                undecodable: 1,
                reloads: 1,
                unknown: 1,
                records: 1,
            }
        );
        assert_eq!(sink.rows_written(), 1);
    }
}
