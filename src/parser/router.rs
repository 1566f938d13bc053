//! Message routing.
//!
//! Dispatches a decoded [`FeedMessage`]: reloads are surfaced to the caller,
//! results are normalized and handed to an emit callback, everything else is
//! logged and dropped.

use super::message::{FeedMessage, ResultsPayload};
use super::results::{normalize_results, RecordStamp, ResultSet, ResultsFragment};
use super::schema::{capture_timestamp, race_start_from_millis, NormalizedRecord};
use log::{debug, info};

/// Stand-in for a results message whose `results` is null
static NO_RESULTS: ResultsFragment = ResultsFragment::empty();

/// What routing one message amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The feed asked for a reload; the current session has to end
    Reload,

    /// A results message, with the number of records emitted
    Results(usize),

    /// Unrecognized message, nothing emitted
    Unknown,
}

/// Routes decoded messages to the normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Router {
    /// Emit the whole leaderboard even when the message names a vehicle
    pub ignore_vehicle_filter: bool,
}

impl Router {
    pub fn new(ignore_vehicle_filter: bool) -> Self {
        Self {
            ignore_vehicle_filter,
        }
    }

    /// Route one message, capturing "now" as the record timestamp
    ///
    /// **Public** - called once per inbound frame
    ///
    /// # Errors
    /// Only errors returned by `emit` are propagated; routing itself is total.
    pub fn route<F, E>(&self, message: &FeedMessage, emit: F) -> Result<RouteOutcome, E>
    where
        F: FnMut(NormalizedRecord) -> Result<(), E>,
    {
        self.route_at(message, capture_timestamp(), emit)
    }

    /// Route one message with an explicit capture timestamp
    pub fn route_at<F, E>(
        &self,
        message: &FeedMessage,
        captured_at: String,
        mut emit: F,
    ) -> Result<RouteOutcome, E>
    where
        F: FnMut(NormalizedRecord) -> Result<(), E>,
    {
        match message {
            FeedMessage::Reload => {
                info!("Reload requested by feed");
                Ok(RouteOutcome::Reload)
            }
            FeedMessage::Results(payload) => {
                let mut emitted = 0;
                for record in self.records(payload, captured_at) {
                    emit(record)?;
                    emitted += 1;
                }
                debug!("Emitted {} records", emitted);
                Ok(RouteOutcome::Results(emitted))
            }
            FeedMessage::Unknown => {
                debug!("Ignoring unknown message");
                Ok(RouteOutcome::Unknown)
            }
        }
    }

    /// Records for a results payload, lazily
    pub fn records<'a>(&self, payload: &'a ResultsPayload, captured_at: String) -> ResultSet<'a> {
        let filter = if self.ignore_vehicle_filter {
            None
        } else {
            payload.race_vehicle_id.clone()
        };

        let stamp = RecordStamp {
            captured_at,
            race_started_at: payload.race_started_at_ms.and_then(race_start_from_millis),
        };

        normalize_results(payload.results.as_ref().unwrap_or(&NO_RESULTS), filter, stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::VehicleId;
    use std::convert::Infallible;

    const TWO_ROWS: &str = r#"<tr data-race-vehicle-id="1"></tr><tr data-race-vehicle-id="2"></tr>"#;

    fn payload(filter: Option<&str>) -> ResultsPayload {
        ResultsPayload {
            race_vehicle_id: filter.map(VehicleId::new),
            race_started_at_ms: None,
            results: Some(ResultsFragment::new(TWO_ROWS)),
        }
    }

    #[test]
    fn test_route_unknown_emits_nothing() {
        let outcome = Router::default()
            .route_at(&FeedMessage::Unknown, String::new(), |_| -> Result<(), Infallible> {
                panic!("nothing should be emitted")
            })
            .unwrap();
        assert_eq!(outcome, RouteOutcome::Unknown);
    }

    #[test]
    fn test_route_applies_filter() {
        let mut seen = Vec::new();
        let outcome = Router::default()
            .route_at(&FeedMessage::Results(payload(Some("2"))), "t".to_string(), |r| {
                seen.push(r);
                Ok::<(), Infallible>(())
            })
            .unwrap();
        assert_eq!(outcome, RouteOutcome::Results(1));
        assert_eq!(seen[0].row.vehicle_id, Some(VehicleId::new("2")));
    }

    #[test]
    fn test_ignore_vehicle_filter() {
        let router = Router::new(true);
        let payload = payload(Some("2"));
        assert_eq!(router.records(&payload, "t".to_string()).count(), 2);
    }

    #[test]
    fn test_null_results_emit_nothing() {
        let payload = ResultsPayload {
            results: None,
            ..payload(None)
        };
        let outcome = Router::default()
            .route_at(&FeedMessage::Results(payload), "t".to_string(), |_| {
                Err("nothing should be emitted")
            })
            .unwrap();
        assert_eq!(outcome, RouteOutcome::Results(0));
    }

    #[test]
    fn test_emit_error_propagates() {
        let result = Router::default().route_at(
            &FeedMessage::Results(payload(None)),
            "t".to_string(),
            |_| Err("sink closed"),
        );
        assert_eq!(result, Err("sink closed"));
    }
}
