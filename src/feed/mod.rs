//! Live-timing websocket session handling.

pub mod client;
pub mod supervisor;
pub mod types;

pub use client::{process_frame, run_session};
pub use supervisor::supervise;
pub use types::{FeedConfig, SessionContext, SessionEnd, Subscription};
