//! Session supervision.
//!
//! Restarts the session forever: no backoff, no retry limit. Only
//! session-level failures are caught here; extraction never fails.

use super::client::run_session;
use super::types::{FeedConfig, SessionContext, SessionEnd};
use crate::output::CsvSink;
use crate::parser::Router;
use log::{error, info, warn};
use std::io::Write;

/// Keep a session running until the process is stopped
///
/// **Public** - main loop of the `watch` command
pub async fn supervise<W: Write>(config: &FeedConfig, router: &Router, sink: &mut CsvSink<W>) {
    let mut session_id: u64 = 0;

    loop {
        session_id += 1;
        let ctx = SessionContext {
            id: session_id,
            endpoint: config.url.clone(),
        };

        match run_session(config, &ctx, router, sink).await {
            Ok(SessionEnd::Reload) => info!("{} restarting after reload", ctx),
            Ok(SessionEnd::Closed) => warn!("{} connection closed, restarting", ctx),
            Err(e) => error!("{} session failed: {}, restarting", ctx, e),
        }
    }
}
