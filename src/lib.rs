//! Kart Timing
//!
//! Records a go-kart venue's live-timing feed as CSV.
//!
//! The feed pushes JSON messages over a websocket; leaderboard updates carry
//! an HTML table fragment. This crate extracts the rows of that fragment,
//! keeps the row of the vehicle that just completed a lap, and writes
//! timestamped records for downstream tools.
//!
//! ## Getting Started
//!
//! ```bash
//! kart-timing watch --output laps.csv --header
//! kart-timing replay --input frames.jsonl
//! ```

pub mod commands;
pub mod feed;
pub mod output;
pub mod parser;
pub mod utils;
