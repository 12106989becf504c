//! The Entity Recognizer Adapter: an optional, model-backed second pass over
//! the Detection Engine's regex findings.
//!
//! No recognizer implementation ships in this crate. The adapter is allowed
//! to be absent or fail to initialize; in both cases the core continues in
//! regex-only mode and records a `Warning::RecognizerUnavailable` rather
//! than aborting the rest of detection.
//! License: Apache-2.0

use crate::span::{Source, Span};

/// The closed set of labels a recognizer span is allowed to carry once
/// normalized. A model span whose label falls outside this set is dropped
/// by the Detection Engine rather than passed through untranslated.
pub const CANONICAL_LABELS: &[&str] = &["NAME", "ORGANIZATION", "LOCATION"];

/// Canonical labels an adapter's raw model labels are normalized to before
/// spans enter the Detection Engine. Labels outside `CANONICAL_LABELS` are
/// passed through unchanged so the caller can filter them out.
pub fn normalize_label(raw: &str) -> String {
    match raw.to_ascii_uppercase().as_str() {
        "PER" | "PERSON" => "NAME".to_string(),
        "ORG" => "ORGANIZATION".to_string(),
        "LOC" | "GPE" => "LOCATION".to_string(),
        other => other.to_string(),
    }
}

/// Whether `label` (already normalized) is a member of the recognizer's
/// canonical label set.
pub fn is_canonical_label(label: &str) -> bool {
    CANONICAL_LABELS.contains(&label)
}

/// Contract for a pluggable entity recognizer.
///
/// Implementors must be safe to share across threads, since an orchestrator
/// may hold one behind an `Arc` and call it from concurrent `sanitize`
/// invocations.
pub trait EntityRecognizer: Send + Sync {
    /// Whether a model is currently loaded and usable.
    fn available(&self) -> bool;

    /// Labels free text, producing spans with `source = Source::Model` and
    /// canonically normalized labels. Implementors should return an empty
    /// list rather than panicking when `available()` is false.
    fn label_text(&self, text: &str) -> Vec<Span>;
}

/// The default recognizer: always unavailable, always empty. This is what
/// lets the crate run fully regex-only with zero external model
/// dependencies.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecognizer;

impl EntityRecognizer for NullRecognizer {
    fn available(&self) -> bool {
        false
    }

    fn label_text(&self, _text: &str) -> Vec<Span> {
        Vec::new()
    }
}

#[allow(dead_code)]
fn model_span(label: &str, start: usize, end: usize, text: &str, confidence: f64) -> Span {
    Span {
        label: normalize_label(label),
        start,
        end,
        text: text.to_string(),
        confidence,
        source: Source::Model,
        rule_tier: 2,
        pack_order: usize::MAX,
        rule_order: usize::MAX,
    }
}
