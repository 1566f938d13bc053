//! Types exchanged with the live-timing websocket.

use serde::Serialize;
use std::fmt;

/// Subscription frame sent once after the connection is established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub track_id: u32,
    pub screen_id: u32,
}

impl Subscription {
    pub fn new(track_id: u32, screen_id: u32) -> Self {
        Self {
            track_id,
            screen_id,
        }
    }
}

/// Where to connect and what to subscribe to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Websocket endpoint (`ws://` or `wss://`)
    pub url: String,

    pub subscription: Subscription,
}

/// Connection identity carried on every session log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub id: u64,
    pub endpoint: String,
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[session #{} {}]", self.id, self.endpoint)
    }
}

/// How a session ended without a transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The feed sent a reload message
    Reload,

    /// The server closed the connection or the stream ended
    Closed,
}
