//! The Format Parser Set: turns raw input into maskable `Fragment`s, and
//! turns fragments plus their replacements back into reconstructed output.
//!
//! Three selectable parser variants: plain text treats the whole input as
//! one fragment; structured walks a JSON value tree and masks only string
//! leaves; markup extracts text runs, tag content, and a small allow-list
//! of attributes from simple HTML/XML-like input.
//! License: Apache-2.0

pub mod markup;
pub mod plain;
pub mod structured;

use serde_json::Value;

use crate::config::FormatHint;
use crate::error::MaskError;

/// Where a `Fragment`'s text came from, opaque to detection and masking but
/// sufficient for the owning parser to reconstruct output.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    /// The fragment is the entire input (plain parser).
    Whole,
    /// A path of object keys / array indices from the root of a structured
    /// tree down to a string leaf.
    Path(Vec<PathSegment>),
    /// A byte offset range into the original markup input.
    ByteRange(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A unit of text extracted by a parser, ready for the Detection Engine.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub text: String,
    pub locator: Locator,
}

/// Maximum recursion depth the structured parser will walk before failing
/// with `MaskError::StructuredDepthExceeded`.
pub const MAX_STRUCTURED_DEPTH: usize = 64;

/// Auto-detects which parser variant applies to `input` unless `hint` pins
/// a specific variant.
pub fn select_format(input: &str, hint: FormatHint) -> DetectedFormat {
    match hint {
        FormatHint::Text => DetectedFormat::Plain,
        FormatHint::Structured => DetectedFormat::Structured,
        FormatHint::Markup => DetectedFormat::Markup,
        FormatHint::Auto => {
            if let Ok(value) = serde_json::from_str::<Value>(input) {
                if matches!(value, Value::Object(_) | Value::Array(_)) {
                    return DetectedFormat::Structured;
                }
            }
            let trimmed = input.trim_start();
            if trimmed.starts_with('<') && trimmed.contains('>') {
                return DetectedFormat::Markup;
            }
            DetectedFormat::Plain
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFormat {
    Plain,
    Structured,
    Markup,
}

/// The outcome of parsing: the extracted fragments plus whatever state the
/// parser needs to reconstruct output later (for the structured parser,
/// the parsed tree; for others, the original text is enough).
pub enum ParseOutcome {
    Plain {
        fragments: Vec<Fragment>,
    },
    Structured {
        root: Value,
        fragments: Vec<Fragment>,
    },
    Markup {
        fragments: Vec<Fragment>,
    },
}

/// Parses `input` according to `format`, falling back to the plain parser
/// on malformed markup or malformed JSON (recorded by the caller as a
/// `Warning::ParserFallback`).
pub fn parse(input: &str, format: DetectedFormat) -> Result<(ParseOutcome, bool), MaskError> {
    match format {
        DetectedFormat::Plain => Ok((
            ParseOutcome::Plain {
                fragments: plain::parse(input),
            },
            false,
        )),
        DetectedFormat::Structured => match structured::parse(input, MAX_STRUCTURED_DEPTH) {
            Ok((root, fragments)) => Ok((ParseOutcome::Structured { root, fragments }, false)),
            Err(MaskError::StructuredDepthExceeded(d)) => {
                Err(MaskError::StructuredDepthExceeded(d))
            }
            Err(_) => Ok((
                ParseOutcome::Plain {
                    fragments: plain::parse(input),
                },
                true,
            )),
        },
        DetectedFormat::Markup => match markup::parse(input) {
            Some(fragments) => Ok((ParseOutcome::Markup { fragments }, false)),
            None => Ok((
                ParseOutcome::Plain {
                    fragments: plain::parse(input),
                },
                true,
            )),
        },
    }
}

/// Reconstructs final output from a `ParseOutcome` and a resolved
/// `(Locator, replacement)` list, one entry per fragment that received a
/// replacement (fragments with no matches pass their original text through).
pub fn reconstruct(
    input: &str,
    outcome: &ParseOutcome,
    replacements: &[(Locator, String)],
) -> Result<String, MaskError> {
    match outcome {
        ParseOutcome::Plain { .. } => Ok(plain::reconstruct(input, replacements)),
        ParseOutcome::Structured { root, .. } => {
            Ok(structured::reconstruct(root, replacements).to_string())
        }
        ParseOutcome::Markup { fragments } => Ok(markup::reconstruct(input, fragments, replacements)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_detects_structured_object() {
        let input = r#"{"a": 1}"#;
        assert_eq!(select_format(input, FormatHint::Auto), DetectedFormat::Structured);
    }

    #[test]
    fn auto_detects_markup() {
        let input = "<p>hello</p>";
        assert_eq!(select_format(input, FormatHint::Auto), DetectedFormat::Markup);
    }

    #[test]
    fn auto_detects_plain() {
        let input = "just some text";
        assert_eq!(select_format(input, FormatHint::Auto), DetectedFormat::Plain);
    }

    #[test]
    fn explicit_hint_overrides_autodetection() {
        let input = "<p>hello</p>";
        assert_eq!(select_format(input, FormatHint::Text), DetectedFormat::Plain);
    }
}
