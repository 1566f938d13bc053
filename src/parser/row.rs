//! Row extraction for the leaderboard fragment.
//!
//! Turns one `<tr>` of the timing screen into a [`ResultRow`]. Extraction is
//! total: missing attributes, elements or cells become absent fields, never
//! errors. The parsed tree is only read, never modified.
//!
//! Expected row shape (every part optional):
//!
//! ```text
//! <tr data-race-vehicle-id="42">
//!   <span class="screen__track__results__position">3</span>
//!   <td><span/>Jane Doe - Kart 7<span/></td>   name - kart
//!   <td>0:45.123</td>                            best time
//!   <td>0:46.001</td>                            last lap
//!   <td>12</td>                                  laps
//!   <td>+1.234</td>                              delta
//! </tr>
//! ```

use super::markup::descendants;
use super::schema::{ResultRow, VehicleId};
use crate::utils::config::{
    CELL_TAG, NAME_KART_SEPARATOR, POSITION_CLASS, POSITION_TAG, VEHICLE_ID_ATTR,
};
use tl::{HTMLTag, NodeHandle, Parser};

/// Index of the name/kart text node among the first cell's children
const NAME_KART_CHILD_INDEX: usize = 2;

/// Extract a [`ResultRow`] from one row element
///
/// **Public** - used by the result-set normalizer and tests
pub fn extract_row<'a>(row: &HTMLTag<'a>, parser: &Parser<'a>) -> ResultRow {
    let vehicle_id = row
        .attributes()
        .get(VEHICLE_ID_ATTR)
        .flatten()
        .map(|value| VehicleId::new(clean_text(&value.as_utf8_str())));

    let position = descendants(row, parser, POSITION_TAG)
        .into_iter()
        .filter_map(|handle| handle.get(parser).and_then(|node| node.as_tag()))
        .find(|span| span.attributes().is_class_member(POSITION_CLASS))
        .map(|span| clean_text(&span.inner_text(parser)));

    let cells: Vec<&HTMLTag<'a>> = descendants(row, parser, CELL_TAG)
        .into_iter()
        .filter_map(|handle| handle.get(parser).and_then(|node| node.as_tag()))
        .collect();

    let (name, kart) = cells
        .first()
        .and_then(|cell| name_kart_text(cell, parser))
        .map(|text| split_name_kart(&text))
        .unwrap_or((None, None));

    let cell_text = |index: usize| cells.get(index).map(|cell| clean_text(&cell.inner_text(parser)));

    ResultRow {
        vehicle_id,
        position,
        name,
        kart,
        best_time: cell_text(1),
        last_lap: cell_text(2),
        laps: cell_text(3),
        delta: cell_text(4),
    }
}

/// Split `"Name - Kart"` once on the separator
///
/// **Public** - exposed for tests
///
/// Empty text yields both halves absent; text without the separator is all
/// name.
pub fn split_name_kart(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim();
    if text.is_empty() {
        return (None, None);
    }

    match text.split_once(NAME_KART_SEPARATOR) {
        Some((name, kart)) => (Some(name.trim().to_string()), Some(kart.trim().to_string())),
        None => (Some(text.to_string()), None),
    }
}

/// Decode HTML entities (named and numeric) and trim whitespace
///
/// **Public** - exposed for tests
///
/// `tl` leaves entities in text and attribute values as written. A decoded
/// `&nbsp;` counts as whitespace when trimming.
pub fn clean_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_string()
}

/// Name/kart text of the first cell (`<span/>TEXT<span/>`)
///
/// **Private** - internal helper for extract_row
///
/// The cell needs at least three child nodes. The third child is used when
/// it carries text; when it is an empty marker span, the nearest text node
/// before it is used instead.
fn name_kart_text<'a>(cell: &HTMLTag<'a>, parser: &Parser<'a>) -> Option<String> {
    let children: Vec<NodeHandle> = cell.children().top().iter().copied().collect();
    if children.len() <= NAME_KART_CHILD_INDEX {
        return None;
    }

    let text_of = |handle: &NodeHandle| {
        handle
            .get(parser)
            .map(|node| clean_text(&node.inner_text(parser)))
            .filter(|text| !text.is_empty())
    };

    text_of(&children[NAME_KART_CHILD_INDEX]).or_else(|| {
        children[..NAME_KART_CHILD_INDEX]
            .iter()
            .rev()
            .filter(|handle| handle.get(parser).is_some_and(|node| node.as_raw().is_some()))
            .find_map(&text_of)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::markup::{expand_self_closing, find_elements};

    fn extract_first(html: &str) -> ResultRow {
        let html = expand_self_closing(html);
        let dom = tl::parse(&html, tl::ParserOptions::default()).unwrap();
        let parser = dom.parser();
        let handle = find_elements(dom.children(), parser, "tr")[0];
        let row = handle.get(parser).unwrap().as_tag().unwrap();
        extract_row(row, parser)
    }

    #[test]
    fn test_split_name_kart() {
        assert_eq!(
            split_name_kart("Jane Doe - Kart 7"),
            (Some("Jane Doe".to_string()), Some("Kart 7".to_string()))
        );
        assert_eq!(split_name_kart("Jane Doe"), (Some("Jane Doe".to_string()), None));
        assert_eq!(split_name_kart("   "), (None, None));
    }

    #[test]
    fn test_split_name_kart_splits_once() {
        assert_eq!(
            split_name_kart("A - B - C"),
            (Some("A".to_string()), Some("B - C".to_string()))
        );
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Tom &amp; Jerry&nbsp;"), "Tom & Jerry");
        assert_eq!(clean_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_clean_text_numeric_and_named_entities() {
        assert_eq!(clean_text("Jan Dvo&#345;&aacute;k"), "Jan Dvořák");
        assert_eq!(clean_text("0:45&#46;1"), "0:45.1");
        assert_eq!(clean_text("&#x2B;1&#x2e;234"), "+1.234");
    }

    #[test]
    fn test_self_closing_marker_spans() {
        let row = extract_first(
            r#"<tr data-race-vehicle-id="4"><td><span/>Jane Doe - Kart 7<span/></td><td>0:45.123</td></tr>"#,
        );
        assert_eq!(row.name.as_deref(), Some("Jane Doe"));
        assert_eq!(row.kart.as_deref(), Some("Kart 7"));
        assert_eq!(row.best_time.as_deref(), Some("0:45.123"));
    }

    #[test]
    fn test_uppercase_markup() {
        let row = extract_first(
            r#"<TR data-race-vehicle-id="3"><SPAN class="screen__track__results__position">2</SPAN><TD><SPAN></SPAN>Eva Kr&aacute;lov&#225; - 9<SPAN></SPAN></TD><TD>1</TD></TR>"#,
        );
        assert_eq!(row.vehicle_id, Some(VehicleId::new("3")));
        assert_eq!(row.position.as_deref(), Some("2"));
        assert_eq!(row.name.as_deref(), Some("Eva Králová"));
        assert_eq!(row.kart.as_deref(), Some("9"));
        assert_eq!(row.best_time.as_deref(), Some("1"));
    }

    #[test]
    fn test_row_without_cells() {
        let row = extract_first(r#"<table><tr data-race-vehicle-id="7"></tr></table>"#);
        assert_eq!(row.vehicle_id, Some(VehicleId::new("7")));
        assert_eq!(row.position, None);
        assert_eq!(row.name, None);
        assert_eq!(row.best_time, None);
        assert_eq!(row.delta, None);
    }

    #[test]
    fn test_first_cell_without_expected_shape() {
        let row = extract_first("<tr><td>Jane Doe - Kart 7</td><td>0:45.123</td></tr>");
        assert_eq!(row.vehicle_id, None);
        assert_eq!(row.name, None);
        assert_eq!(row.kart, None);
        assert_eq!(row.best_time.as_deref(), Some("0:45.123"));
        assert_eq!(row.last_lap, None);
    }
}
