//! Feed message parsing and leaderboard extraction.
//!
//! This module handles:
//! - Decoding inbound JSON frames into tagged messages
//! - Extracting result rows from the embedded HTML fragment
//! - Filtering to the vehicle that just completed a lap
//! - Routing messages to the normalizer

pub mod markup;
pub mod message;
pub mod results;
pub mod router;
pub mod row;
pub mod schema;

// Re-export main types
pub use message::{FeedMessage, ResultsPayload};
pub use results::{normalize_results, RecordStamp, ResultSet, ResultsFragment};
pub use router::{RouteOutcome, Router};
pub use row::extract_row;
pub use schema::{NormalizedRecord, ResultRow, VehicleId};
