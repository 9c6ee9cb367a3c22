//! Stable heading-id assignment over rendered HTML.
//!
//! Ids are sequential in document order (`heading-1`, `heading-2`,
//! ...) and must be identical between the measurement-pass HTML and
//! the render-pass HTML; both passes receive the same transformed
//! body, so assignment happens exactly once, here.

use crate::model::Heading;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h([1-6])([^>]*)>(.*?)</h[1-6]>").expect("valid heading regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag-strip regex"));

/// Assign sequential ids to every `h1`-`h6` element in document
/// order. Returns the rewritten HTML and the extracted headings with
/// entity-decoded plain text.
pub fn assign_heading_ids(html: &str) -> (String, Vec<Heading>) {
    let mut headings = Vec::new();
    let mut counter = 0usize;

    let rewritten = HEADING_RE.replace_all(html, |caps: &Captures| {
        counter += 1;
        let id = format!("heading-{}", counter);
        let level: u8 = caps[1].parse().unwrap_or(6);
        let attrs = &caps[2];
        let inner = &caps[3];

        headings.push(Heading {
            id: id.clone(),
            level,
            text: plain_text(inner),
            page_number: None,
        });

        format!("<h{} id=\"{}\"{}>{}</h{}>", level, id, attrs, inner, level)
    });

    (rewritten.into_owned(), headings)
}

/// Strip inner markup and decode HTML entities to plain characters,
/// so a later TOC insertion does not double-escape.
fn plain_text(inner: &str) -> String {
    let stripped = TAG_RE.replace_all(inner, "");
    decode_entities(stripped.trim())
}

/// Decode the named entities the markdown renderer emits plus
/// numeric character references.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..end];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            "nbsp" => out.push('\u{a0}'),
            _ => {
                let decoded = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => out.push(c),
                    None => {
                        // Unknown entity, keep it verbatim.
                        out.push_str(&tail[..=end]);
                    }
                }
            }
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}
