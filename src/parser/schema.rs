//! Record types produced from the live-timing results fragment.
//!
//! Every extracted field is display text exactly as the timing screen
//! renders it; nothing is coerced to numbers or durations.

use crate::utils::config::{CSV_COLUMNS, TIMESTAMP_FORMAT};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;

/// Identifier of a vehicle in the current race
///
/// Both the row attribute and the `raceVehicleId` message field are
/// normalized to this string form before they are compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build from a JSON value (string or number)
    ///
    /// Integral floats render without a fraction so that `42.0` and `"42"`
    /// compare equal. Null and other JSON types yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::new(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self(i.to_string()))
                } else if let Some(u) = n.as_u64() {
                    Some(Self(u.to_string()))
                } else {
                    n.as_f64().map(|f| {
                        if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                            Self((f as i64).to_string())
                        } else {
                            Self(f.to_string())
                        }
                    })
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One leaderboard row parsed from a `<tr>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub vehicle_id: Option<VehicleId>,
    pub position: Option<String>,
    pub name: Option<String>,
    pub kart: Option<String>,
    pub best_time: Option<String>,
    pub last_lap: Option<String>,
    pub laps: Option<String>,
    pub delta: Option<String>,
}

/// One output row: a `ResultRow` stamped with capture and race-start times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Moment the inbound message was processed, local time
    pub captured_at: String,

    /// Race start, local time, if the message carried one
    pub race_started_at: Option<String>,

    pub row: ResultRow,
}

impl NormalizedRecord {
    /// Fields in CSV column order; absent fields render as empty strings
    pub fn to_fields(&self) -> [&str; CSV_COLUMNS.len()] {
        let row = &self.row;
        [
            self.captured_at.as_str(),
            self.race_started_at.as_deref().unwrap_or(""),
            row.vehicle_id.as_ref().map(VehicleId::as_str).unwrap_or(""),
            row.position.as_deref().unwrap_or(""),
            row.name.as_deref().unwrap_or(""),
            row.kart.as_deref().unwrap_or(""),
            row.best_time.as_deref().unwrap_or(""),
            row.last_lap.as_deref().unwrap_or(""),
            row.laps.as_deref().unwrap_or(""),
            row.delta.as_deref().unwrap_or(""),
        ]
    }
}

/// Render a local timestamp the way records carry it
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, rendered for `capturedAt`
pub fn capture_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Convert epoch milliseconds into a rendered local timestamp
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn race_start_from_millis(millis: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(millis)
        .earliest()
        .map(|ts| format_timestamp(&ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_id_from_json() {
        assert_eq!(VehicleId::from_json(&json!("42")), Some(VehicleId::new("42")));
        assert_eq!(VehicleId::from_json(&json!(" 42 ")), Some(VehicleId::new("42")));
        assert_eq!(VehicleId::from_json(&json!(42)), Some(VehicleId::new("42")));
        assert_eq!(VehicleId::from_json(&json!(42.0)), Some(VehicleId::new("42")));
        assert_eq!(VehicleId::from_json(&json!(null)), None);
        assert_eq!(VehicleId::from_json(&json!([42])), None);
    }

    #[test]
    fn test_race_start_keeps_milliseconds() {
        let rendered = race_start_from_millis(1_745_238_987_937).unwrap();
        assert!(rendered.ends_with(".937000"), "got {}", rendered);
        assert!(rendered.starts_with("2025-04-2"));
    }

    #[test]
    fn test_race_start_out_of_range() {
        assert_eq!(race_start_from_millis(i64::MAX), None);
    }

    #[test]
    fn test_fields_render_absent_as_empty() {
        let record = NormalizedRecord {
            captured_at: "2025-04-21T14:36:27.000000".to_string(),
            race_started_at: None,
            row: ResultRow {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
        };

        assert_eq!(
            record.to_fields(),
            ["2025-04-21T14:36:27.000000", "", "", "", "Jane Doe", "", "", "", "", ""]
        );
    }
}
