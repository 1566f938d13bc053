//! Decoding of inbound feed frames.
//!
//! The feed distinguishes messages only by which top-level keys are present.
//! That is resolved once here into [`FeedMessage`]; everything downstream
//! matches on the variant.

use super::results::ResultsFragment;
use super::schema::VehicleId;
use crate::utils::error::ParseError;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

/// One decoded inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// The screen asks its clients to reload; the session must restart
    Reload,

    /// Leaderboard update
    Results(ResultsPayload),

    /// Anything else the feed sends
    Unknown,
}

/// Leaderboard update carried by a results message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPayload {
    /// Vehicle whose lap just completed; `None` means every row is wanted
    pub race_vehicle_id: Option<VehicleId>,

    /// Race start as epoch milliseconds
    pub race_started_at_ms: Option<i64>,

    /// HTML fragment with the leaderboard rows
    pub results: Option<ResultsFragment>,
}

/// Wire shape of a results message
///
/// Fields stay loosely typed; the feed mixes strings, numbers and nulls.
#[derive(Debug, Deserialize)]
struct RawResultsMessage {
    #[serde(default, rename = "raceVehicleId")]
    race_vehicle_id: Option<Value>,

    #[serde(default)]
    race: Option<Value>,

    #[serde(default)]
    results: Option<Value>,
}

impl FeedMessage {
    /// Decode one text frame
    ///
    /// **Public** - called by the session driver and replay
    ///
    /// # Errors
    /// * `ParseError::JsonError` - frame is not JSON
    /// * `ParseError::InvalidFormat` - frame is JSON but not an object
    pub fn decode(frame: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(frame)?;
        Self::from_value(value)
    }

    /// Classify an already parsed JSON value
    ///
    /// `reload` wins over `results` when both keys are present.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        let Value::Object(obj) = value else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected a JSON object, found {}",
                json_type_name(&value)
            )));
        };

        if obj.contains_key("reload") {
            return Ok(FeedMessage::Reload);
        }

        if !obj.contains_key("results") {
            return Ok(FeedMessage::Unknown);
        }

        let raw: RawResultsMessage = serde_json::from_value(Value::Object(obj))?;
        Ok(FeedMessage::Results(raw.into_payload()))
    }
}

impl RawResultsMessage {
    fn into_payload(self) -> ResultsPayload {
        let race_vehicle_id = self.race_vehicle_id.and_then(|value| {
            let id = VehicleId::from_json(&value);
            if id.is_none() && !value.is_null() {
                warn!("Ignoring unsupported raceVehicleId: {}", value);
            }
            id
        });

        let race_started_at_ms = self
            .race
            .as_ref()
            .and_then(|race| race.get("startedAt"))
            .and_then(parse_started_at);

        let results = match self.results {
            Some(Value::String(html)) => Some(ResultsFragment::new(&html)),
            Some(Value::Null) | None => None,
            Some(other) => {
                warn!("Ignoring non-string results field of type {}", json_type_name(&other));
                None
            }
        };

        ResultsPayload {
            race_vehicle_id,
            race_started_at_ms,
            results,
        }
    }
}

/// Interpret `race.startedAt` as epoch milliseconds (number or numeric string)
///
/// **Private** - internal helper for into_payload
fn parse_started_at(value: &Value) -> Option<i64> {
    let millis = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    };

    if millis.is_none() {
        warn!("Ignoring unparseable race.startedAt: {}", value);
    }
    millis
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
