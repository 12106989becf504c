//! The Detection Engine: runs the regex pass and (optionally) the
//! recognizer pass over a fragment, applies whitelist/type filters and
//! validators, and resolves overlaps via `span::resolve_conflicts`.
//! License: Apache-2.0

use crate::config::Config;
use crate::pattern::Registry;
use crate::recognizer::{is_canonical_label, EntityRecognizer};
use crate::span::{resolve_conflicts, Source, Span};

/// A validator failure under non-strict validation still keeps the span,
/// but it is demoted to this tier rather than trusted at the rule's
/// declared tier.
const LOW_CONFIDENCE_TIER: u8 = 2;

/// A non-fatal condition recorded alongside a successful detection pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The recognizer was consulted but is not available; detection
    /// proceeded regex-only.
    RecognizerUnavailable,
    /// The requested parser format failed and the plain parser was used
    /// instead.
    ParserFallback,
}

/// Runs detection over a single fragment's text, returning the resolved,
/// non-overlapping span list plus any warnings raised along the way.
pub fn detect_in_fragment(
    text: &str,
    registry: &Registry,
    recognizer: &dyn EntityRecognizer,
    config: &Config,
) -> (Vec<Span>, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut candidates = regex_pass(text, registry, config.strict_validation);

    if !config.regex_only {
        if recognizer.available() {
            let mut model_spans = recognizer.label_text(text);
            model_spans.retain(|s| s.confidence >= config.min_confidence && is_canonical_label(&s.label));
            candidates.extend(model_spans);
        } else {
            warnings.push(Warning::RecognizerUnavailable);
        }
    }

    candidates.retain(|span| !config.whitelist.contains(&span.text));
    if !config.mask_types.is_empty() {
        candidates.retain(|span| config.mask_types.contains(&span.label));
    }

    let resolved = resolve_conflicts(candidates);
    (resolved, warnings)
}

/// Runs every compiled rule's regex over `text`. A span whose rule carries a
/// validator and fails it is dropped when `strict_validation` is true;
/// otherwise the validator's verdict is advisory, the span is kept, and its
/// tier is demoted to `LOW_CONFIDENCE_TIER`.
fn regex_pass(text: &str, registry: &Registry, strict_validation: bool) -> Vec<Span> {
    let mut spans = Vec::new();
    for rule in registry.rules() {
        for m in rule.regex.find_iter(text) {
            let matched = m.as_str();

            let mut tier = rule.tier;
            if let Some(validate) = rule.validator {
                if !validate(matched) {
                    if strict_validation {
                        continue;
                    }
                    tier = LOW_CONFIDENCE_TIER;
                }
            }

            spans.push(Span {
                label: rule.label.clone(),
                start: m.start(),
                end: m.end(),
                text: matched.to_string(),
                confidence: 1.0,
                source: Source::Regex,
                rule_tier: tier,
                pack_order: rule.pack_order,
                rule_order: rule.rule_order,
            });
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::NullRecognizer;

    fn registry() -> Registry {
        Registry::default_only().unwrap()
    }

    #[test]
    fn finds_email_in_plain_text() {
        let config = Config::default();
        let (spans, _warnings) = detect_in_fragment(
            "Contact john.doe@example.com now",
            &registry(),
            &NullRecognizer,
            &config,
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "EMAIL");
    }

    #[test]
    fn regex_only_config_never_consults_recognizer() {
        let mut config = Config::default();
        config.regex_only = true;
        let (_spans, warnings) = detect_in_fragment("plain text", &registry(), &NullRecognizer, &config);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unavailable_recognizer_without_regex_only_raises_warning() {
        let config = Config::default();
        let (_spans, warnings) = detect_in_fragment("plain text", &registry(), &NullRecognizer, &config);
        assert_eq!(warnings, vec![Warning::RecognizerUnavailable]);
    }

    #[test]
    fn whitelist_removes_matching_span() {
        let mut config = Config::default();
        config.whitelist.insert("john.doe@example.com".to_string());
        let (spans, _) = detect_in_fragment(
            "Contact john.doe@example.com now",
            &registry(),
            &NullRecognizer,
            &config,
        );
        assert!(spans.is_empty());
    }

    #[test]
    fn mask_types_filters_to_named_labels_only() {
        let mut config = Config::default();
        config.mask_types.insert("PHONE".to_string());
        let (spans, _) = detect_in_fragment(
            "Contact john.doe@example.com or 555-123-4567",
            &registry(),
            &NullRecognizer,
            &config,
        );
        assert!(spans.iter().all(|s| s.label == "PHONE"));
    }

    #[test]
    fn failed_validator_drops_the_span_under_strict_validation() {
        let mut config = Config::default();
        config.strict_validation = true;
        let (spans, _) = detect_in_fragment(
            "Card 4111-1111-1111-1112",
            &registry(),
            &NullRecognizer,
            &config,
        );
        assert!(spans.is_empty());
    }

    #[test]
    fn failed_validator_is_kept_without_strict_validation() {
        let config = Config::default();
        let (spans, _) = detect_in_fragment(
            "Card 4111-1111-1111-1112",
            &registry(),
            &NullRecognizer,
            &config,
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "CREDIT_CARD_NUMBER");
        assert_eq!(spans[0].rule_tier, LOW_CONFIDENCE_TIER);
    }

    #[test]
    fn passing_validator_keeps_the_rule_tier() {
        let config = Config::default();
        let (spans, _) = detect_in_fragment(
            "Card 4111-1111-1111-1111",
            &registry(),
            &NullRecognizer,
            &config,
        );
        assert_eq!(spans.len(), 1);
        assert_ne!(spans[0].rule_tier, LOW_CONFIDENCE_TIER);
    }

    #[test]
    fn recognizer_spans_outside_canonical_label_set_are_dropped() {
        struct MiscRecognizer;
        impl EntityRecognizer for MiscRecognizer {
            fn available(&self) -> bool {
                true
            }
            fn label_text(&self, text: &str) -> Vec<Span> {
                vec![Span {
                    label: "MISC".to_string(),
                    start: 0,
                    end: text.len(),
                    text: text.to_string(),
                    confidence: 1.0,
                    source: Source::Model,
                    rule_tier: 2,
                    pack_order: usize::MAX,
                    rule_order: usize::MAX,
                }]
            }
        }

        let config = Config::default();
        let (spans, _) = detect_in_fragment("some free text", &registry(), &MiscRecognizer, &config);
        assert!(spans.iter().all(|s| s.label != "MISC"));
    }
}
