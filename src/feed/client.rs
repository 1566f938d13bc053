//! Websocket session against the live-timing endpoint.
//!
//! One session = connect, subscribe, then process frames strictly in order
//! until the feed asks for a reload, the connection closes, or something
//! fails. Restarting is the supervisor's job.

use super::types::{FeedConfig, SessionContext, SessionEnd};
use crate::output::CsvSink;
use crate::parser::{FeedMessage, RouteOutcome, Router};
use crate::utils::error::{FeedError, OutputError};
use futures::{SinkExt, StreamExt};
use log::{debug, error, info};
use std::io::Write;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Run a single session to completion
///
/// **Public** - called by the supervisor for every (re)connect
///
/// # Returns
/// How the session ended when it ended cleanly
///
/// # Errors
/// * `FeedError::WebSocket` - connect, send or receive failed
/// * `FeedError::Subscription` - subscription frame could not be encoded
/// * `FeedError::Sink` - a record could not be written
pub async fn run_session<W: Write>(
    config: &FeedConfig,
    ctx: &SessionContext,
    router: &Router,
    sink: &mut CsvSink<W>,
) -> Result<SessionEnd, FeedError> {
    info!("{} connecting", ctx);

    let (mut ws, response) = connect_async(config.url.as_str()).await?;
    debug!("{} connected, handshake status {}", ctx, response.status());

    let subscription = serde_json::to_string(&config.subscription)?;
    ws.send(Message::Text(subscription.into())).await?;
    info!(
        "{} subscribed to track {} screen {}",
        ctx, config.subscription.track_id, config.subscription.screen_id
    );

    while let Some(frame) = ws.next().await {
        match frame? {
            Message::Text(text) => {
                debug!("{} message received", ctx);
                if let Some(RouteOutcome::Reload) = process_frame(text.as_str(), router, sink)? {
                    info!("{} reload received, ending session", ctx);
                    return Ok(SessionEnd::Reload);
                }
            }
            Message::Binary(data) => {
                debug!("{} ignoring binary frame ({} bytes)", ctx, data.len());
            }
            Message::Close(reason) => {
                info!("{} server closed connection: {:?}", ctx, reason);
                return Ok(SessionEnd::Closed);
            }
            _ => {}
        }
    }

    info!("{} stream ended", ctx);
    Ok(SessionEnd::Closed)
}

/// Decode and route one text frame, writing any records to the sink
///
/// **Public** - shared by the live session and replay
///
/// # Returns
/// `None` if the frame could not be decoded (logged and skipped),
/// otherwise the routing outcome
///
/// # Errors
/// Only sink failures.
pub fn process_frame<W: Write>(
    frame: &str,
    router: &Router,
    sink: &mut CsvSink<W>,
) -> Result<Option<RouteOutcome>, OutputError> {
    let message = match FeedMessage::decode(frame) {
        Ok(message) => message,
        Err(e) => {
            error!("Error decoding JSON message: {}: {}", e, frame);
            return Ok(None);
        }
    };

    let outcome = router.route(&message, |record| sink.write_record(&record))?;
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_frame_skips_garbage() {
        let mut sink = CsvSink::new(Vec::new());
        let outcome = process_frame("not json", &Router::default(), &mut sink).unwrap();
        assert_eq!(outcome, None);
        assert_eq!(sink.rows_written(), 0);
    }

    #[test]
    fn test_process_frame_reload_writes_nothing() {
        let mut sink = CsvSink::new(Vec::new());
        let frame = r#"{"reload": true, "results": "<tr></tr>"}"#;
        let outcome = process_frame(frame, &Router::default(), &mut sink).unwrap();
        assert_eq!(outcome, Some(RouteOutcome::Reload));
        assert_eq!(sink.rows_written(), 0);
    }

    #[test]
    fn test_process_frame_writes_records() {
        let mut sink = CsvSink::new(Vec::new());
        let frame = r#"{"results": "<tr data-race-vehicle-id=\"1\"></tr><tr></tr>"}"#;
        let outcome = process_frame(frame, &Router::default(), &mut sink).unwrap();
        assert_eq!(outcome, Some(RouteOutcome::Results(2)));
        assert_eq!(sink.rows_written(), 2);
    }
}
