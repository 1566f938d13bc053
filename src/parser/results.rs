//! Result-set normalization.
//!
//! Walks every `<tr>` in a results fragment (at any depth, any letter case,
//! no table validation), extracts it, applies the current-vehicle filter
//! and stamps the message-wide timestamps.

use super::markup::{expand_self_closing, find_elements};
use super::row::extract_row;
use super::schema::{NormalizedRecord, VehicleId};
use crate::utils::config::ROW_TAG;
use log::{debug, warn};
use std::iter::FusedIterator;
use tl::{NodeHandle, VDom};

/// Results markup, prepared for parsing
///
/// Self-closing elements are already expanded (see
/// [`expand_self_closing`]), so the parsed tree nests the way the markup
/// reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsFragment(String);

impl ResultsFragment {
    pub fn new(html: &str) -> Self {
        Self(expand_self_closing(html).into_owned())
    }

    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Timestamps shared by every record normalized from one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStamp {
    pub captured_at: String,
    pub race_started_at: Option<String>,
}

/// Lazy, single-pass sequence of records from one results fragment
///
/// Yields rows in document order. Rows are only extracted when the
/// iterator is advanced.
pub struct ResultSet<'a> {
    dom: Option<VDom<'a>>,
    rows: std::vec::IntoIter<NodeHandle>,
    filter: Option<VehicleId>,
    stamp: RecordStamp,
}

/// Normalize a results fragment
///
/// **Public** - main entry point used by the router
///
/// # Arguments
/// * `fragment` - Results fragment as pushed by the feed
/// * `filter` - When set, only rows whose vehicle id equals it are emitted
/// * `stamp` - Capture and race-start timestamps for every record
pub fn normalize_results<'a>(
    fragment: &'a ResultsFragment,
    filter: Option<VehicleId>,
    stamp: RecordStamp,
) -> ResultSet<'a> {
    let dom = match tl::parse(fragment.as_str(), tl::ParserOptions::default()) {
        Ok(dom) => Some(dom),
        Err(e) => {
            warn!("Failed to parse results fragment: {:?}", e);
            None
        }
    };

    let rows: Vec<NodeHandle> = dom
        .as_ref()
        .map(|dom| find_elements(dom.children(), dom.parser(), ROW_TAG))
        .unwrap_or_default();

    debug!("Results fragment has {} rows, filter: {:?}", rows.len(), filter);

    ResultSet {
        dom,
        rows: rows.into_iter(),
        filter,
        stamp,
    }
}

impl Iterator for ResultSet<'_> {
    type Item = NormalizedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let dom = self.dom.as_ref()?;
        let parser = dom.parser();

        for handle in self.rows.by_ref() {
            let Some(row) = handle.get(parser).and_then(|node| node.as_tag()) else {
                continue;
            };

            let extracted = extract_row(row, parser);

            if let Some(filter) = &self.filter {
                if extracted.vehicle_id.as_ref() != Some(filter) {
                    continue;
                }
            }

            return Some(NormalizedRecord {
                captured_at: self.stamp.captured_at.clone(),
                race_started_at: self.stamp.race_started_at.clone(),
                row: extracted,
            });
        }

        None
    }
}

impl FusedIterator for ResultSet<'_> {}
