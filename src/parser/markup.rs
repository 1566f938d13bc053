//! Markup helpers around the `tl` parser.
//!
//! `tl` ignores the trailing slash on ordinary elements, so `<span/>` opens a
//! span that swallows the rest of its parent. Fragments are rewritten to
//! explicit open/close pairs before they are parsed. Element names are
//! matched ASCII case-insensitively, the way HTML treats them.

use std::borrow::Cow;
use tl::{HTMLTag, NodeHandle, Parser};

/// Elements without content; `<br/>` and friends are left as written
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Rewrite self-closing non-void elements as open/close pairs
///
/// **Public** - applied to every results fragment before parsing
///
/// `<span/>` becomes `<span></span>` and `<td class="x" />` becomes
/// `<td class="x"></td>`. Quoted attribute values are skipped over, and a
/// `<` that does not start an element name is copied through.
pub fn expand_self_closing(html: &str) -> Cow<'_, str> {
    if !html.contains("/>") {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + 32);
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        if !tail[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.push('<');
            rest = &tail[1..];
            continue;
        }

        let Some(close) = tag_end(tail) else {
            rest = tail;
            break;
        };

        let tag = &tail[..=close];
        match self_closing_name(tag) {
            Some(name) if !is_void(name) => {
                out.push_str(tag[..tag.len() - 2].trim_end());
                out.push_str("></");
                out.push_str(name);
                out.push('>');
            }
            _ => out.push_str(tag),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Elements named `name` among `roots` and everything below them
///
/// **Public** - used for rows, cells and marker spans
///
/// Returned in document order; the name comparison ignores ASCII case.
pub fn find_elements(roots: &[NodeHandle], parser: &Parser<'_>, name: &str) -> Vec<NodeHandle> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeHandle> = roots.iter().rev().copied().collect();

    while let Some(handle) = stack.pop() {
        let Some(tag) = handle.get(parser).and_then(|node| node.as_tag()) else {
            continue;
        };

        if is_named(tag, name) {
            found.push(handle);
        }

        let mut children: Vec<NodeHandle> = tag.children().top().iter().copied().collect();
        children.reverse();
        stack.extend(children);
    }

    found
}

/// Descendant elements of `tag` named `name`, in document order
pub fn descendants<'a>(tag: &HTMLTag<'a>, parser: &Parser<'a>, name: &str) -> Vec<NodeHandle> {
    let children: Vec<NodeHandle> = tag.children().top().iter().copied().collect();
    find_elements(&children, parser, name)
}

/// Whether `tag` is a `name` element, ignoring ASCII case
pub fn is_named(tag: &HTMLTag<'_>, name: &str) -> bool {
    tag.name().as_utf8_str().eq_ignore_ascii_case(name)
}

/// Offset of the `>` closing the tag that starts `tag`
///
/// **Private** - internal helper for expand_self_closing
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;

    for (i, b) in tag.bytes().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }

    None
}

/// Element name of a `<name .../>` tag, `None` for any other tag
fn self_closing_name(tag: &str) -> Option<&str> {
    let inner = tag.strip_prefix('<')?.strip_suffix("/>")?;
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    Some(&inner[..end])
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
}
