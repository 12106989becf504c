//! The markup parser: a regex-based tag/text-run/attribute extractor.
//!
//! Deliberately regex-based rather than a full HTML/XML parser. Invalid
//! markup returns `None` so the caller can fall back to the plain parser.
//! License: Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Fragment, Locator};

/// Attribute names whose values are eligible for masking. Everything else
/// (e.g. `id`, `class`, `href`, `src`) passes through untouched.
const RECOGNIZED_ATTRIBUTES: &[&str] = &["alt", "title", "value", "placeholder", "label", "aria-label"];

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<name>[a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#).unwrap()
});

/// Parses `input` into text-run and recognized-attribute-value fragments.
/// Returns `None` if the input doesn't look like well-formed markup (e.g.
/// an odd number of quote characters, indicating a truncated attribute),
/// signaling the caller to fall back to the plain parser.
pub fn parse(input: &str) -> Option<Vec<Fragment>> {
    if input.matches('"').count() % 2 != 0 {
        return None;
    }

    let mut fragments = Vec::new();
    let mut cursor = 0usize;

    for tag_match in TAG_RE.find_iter(input) {
        if tag_match.start() > cursor {
            let text = &input[cursor..tag_match.start()];
            if !text.is_empty() {
                fragments.push(Fragment {
                    text: text.to_string(),
                    locator: Locator::ByteRange(cursor, tag_match.start()),
                });
            }
        }

        let tag_text = tag_match.as_str();
        for attr_caps in ATTR_RE.captures_iter(tag_text) {
            let name = attr_caps.name("name").unwrap().as_str().to_ascii_lowercase();
            if !RECOGNIZED_ATTRIBUTES.contains(&name.as_str()) {
                continue;
            }
            let value_match = attr_caps
                .name("dq")
                .or_else(|| attr_caps.name("sq"))
                .unwrap();
            let abs_start = tag_match.start() + value_match.start();
            let abs_end = tag_match.start() + value_match.end();
            if !value_match.as_str().is_empty() {
                fragments.push(Fragment {
                    text: value_match.as_str().to_string(),
                    locator: Locator::ByteRange(abs_start, abs_end),
                });
            }
        }

        cursor = tag_match.end();
    }

    if cursor < input.len() {
        let text = &input[cursor..];
        if !text.is_empty() {
            fragments.push(Fragment {
                text: text.to_string(),
                locator: Locator::ByteRange(cursor, input.len()),
            });
        }
    }

    Some(fragments)
}

/// Rebuilds `input` by splicing `replacements` in at their byte ranges, in
/// descending offset order so earlier ranges are unaffected by later edits.
pub fn reconstruct(input: &str, _fragments: &[Fragment], replacements: &[(Locator, String)]) -> String {
    let mut ranged: Vec<(usize, usize, &str)> = replacements
        .iter()
        .filter_map(|(locator, text)| match locator {
            Locator::ByteRange(start, end) => Some((*start, *end, text.as_str())),
            _ => None,
        })
        .collect();
    ranged.sort_by(|a, b| b.0.cmp(&a.0));

    let mut output = input.to_string();
    for (start, end, replacement) in ranged {
        output.replace_range(start..end, replacement);
    }
    output
}
