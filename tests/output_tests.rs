use kart_timing::commands::{replay_frames, ReplayStats};
use kart_timing::output::{open_sink, validate_path};
use kart_timing::parser::{NormalizedRecord, ResultRow, Router, VehicleId};
use std::io::Cursor;
use std::path::Path;

fn record(id: &str) -> NormalizedRecord {
    NormalizedRecord {
        captured_at: "2025-04-21T14:40:02.123456".to_string(),
        race_started_at: None,
        row: ResultRow {
            vehicle_id: Some(VehicleId::new(id)),
            position: Some("1".to_string()),
            ..Default::default()
        },
    }
}

#[test]
fn test_file_sink_appends() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("laps.csv");

    let mut sink = open_sink(Some(&path), true).unwrap();
    sink.write_record(&record("1")).unwrap();
    drop(sink);

    let mut sink = open_sink(Some(&path), false).unwrap();
    sink.write_record(&record("2")).unwrap();
    drop(sink);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(r#""capturedAt""#));
    assert_eq!(
        lines[1],
        r#""2025-04-21T14:40:02.123456","","1","1","","","","","","""#
    );
    assert!(lines[2].contains(r#","2","#));
}

#[test]
fn test_record_is_visible_before_sink_is_dropped() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("live.csv");

    let mut sink = open_sink(Some(&path), false).unwrap();
    sink.write_record(&record("7")).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert_eq!(sink.rows_written(), 1);
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/laps.csv");

    let mut sink = open_sink(Some(&nested_path), false).unwrap();
    sink.write_record(&record("1")).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_replay_into_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("replay.csv");
    let frames = concat!(
        r#"{"raceVehicleId": "11", "race": {"startedAt": null}, "results": "<tr data-race-vehicle-id=\"10\"><td>a</td></tr><tr data-race-vehicle-id=\"11\"><td>b</td><td>0:41.000</td></tr>"}"#,
        "\n",
        r#"{"results": "<tr data-race-vehicle-id=\"10\"></tr><tr data-race-vehicle-id=\"11\"></tr>"}"#,
        "\n",
    );

    let mut sink = open_sink(Some(&path), false).unwrap();
    let stats = replay_frames(Cursor::new(frames), &Router::default(), &mut sink).unwrap();

    assert_eq!(
        stats,
        ReplayStats {
            frames: 2,
            records: 3,
            ..Default::default()
        }
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(r#","11","","","","0:41.000","","","""#));
}
