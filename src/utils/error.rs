//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Row extraction and normalization have no error type at all: missing
//! markup degrades to absent fields.

use thiserror::Error;

/// Errors that end a live-feed session
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to encode subscription: {0}")]
    Subscription(#[from] serde_json::Error),

    #[error("Failed to write record: {0}")]
    Sink(#[from] OutputError),
}

/// Errors that can occur while decoding an inbound frame
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during CSV output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to encode CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
