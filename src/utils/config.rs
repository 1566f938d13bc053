//! Configuration and constants for the CLI.

/// Default live-timing websocket endpoint
pub const DEFAULT_FEED_URL: &str = "wss://kartcommander.motokaryplzen.cz/wss/screen_track";

/// Default track and screen the subscription frame asks for
pub const DEFAULT_TRACK_ID: u32 = 6;
pub const DEFAULT_SCREEN_ID: u32 = 3;

// Markup of the results fragment pushed by the timing screen
pub const ROW_TAG: &str = "tr";
pub const CELL_TAG: &str = "td";
pub const VEHICLE_ID_ATTR: &str = "data-race-vehicle-id";
pub const POSITION_TAG: &str = "span";
pub const POSITION_CLASS: &str = "screen__track__results__position";

/// Separator between driver name and kart inside the first cell
pub const NAME_KART_SEPARATOR: &str = " - ";

/// Rendering used for `capturedAt` and `raceStartedAt`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// CSV column order, fixed
pub const CSV_COLUMNS: [&str; 10] = [
    "capturedAt",
    "raceStartedAt",
    "vehicleId",
    "position",
    "name",
    "kart",
    "bestTime",
    "lastLap",
    "laps",
    "delta",
];
