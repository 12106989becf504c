//! The `Span` candidate-finding type and the conflict-resolution routine
//! shared by the regex pass and the recognizer pass of the detection engine.
//! License: Apache-2.0

/// Where a candidate span came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Source {
    /// Regex-derived spans sort before model-derived spans on ties.
    Regex,
    Model,
}

/// A candidate finding produced by the regex pass or the recognizer pass.
///
/// Invariant: `0 <= start < end <= text.len()` and `text == source[start..end]`
/// at the time of detection.
#[derive(Debug, Clone)]
pub struct Span {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub confidence: f64,
    pub source: Source,
    /// 1 = high-confidence structural rule, 2 = heuristic. Model spans are
    /// always tier 2 unless the adapter says otherwise.
    pub rule_tier: u8,
    /// Order of the pack that produced this span, for tie-breaking.
    pub pack_order: usize,
    /// Order of the rule within its pack, for tie-breaking.
    pub rule_order: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Sorts candidates by `(start asc, -length, tier asc, source regex-before-model,
/// pack order, rule order)` and walks left-to-right, keeping the first span at
/// any covered position and discarding any later span whose range intersects
/// an already-accepted one.
///
/// Returns a non-overlapping list in ascending `start` order.
pub fn resolve_conflicts(mut candidates: Vec<Span>) -> Vec<Span> {
    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.rule_tier.cmp(&b.rule_tier))
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.pack_order.cmp(&b.pack_order))
            .then_with(|| a.rule_order.cmp(&b.rule_order))
    });

    let mut accepted: Vec<Span> = Vec::with_capacity(candidates.len());
    let mut last_end = 0usize;
    for span in candidates {
        if span.start >= last_end {
            last_end = span.end;
            accepted.push(span);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(label: &str, start: usize, end: usize, tier: u8, source: Source) -> Span {
        Span {
            label: label.to_string(),
            start,
            end,
            text: String::new(),
            confidence: 1.0,
            source,
            rule_tier: tier,
            pack_order: 0,
            rule_order: 0,
        }
    }

    #[test]
    fn non_overlapping_spans_all_survive() {
        let spans = vec![
            span("EMAIL", 0, 5, 1, Source::Regex),
            span("PHONE", 10, 15, 1, Source::Regex),
        ];
        let resolved = resolve_conflicts(spans);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn longer_overlapping_span_wins() {
        let spans = vec![
            span("SHORT", 0, 5, 1, Source::Regex),
            span("LONG", 0, 10, 1, Source::Regex),
        ];
        let resolved = resolve_conflicts(spans);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].label, "LONG");
    }

    #[test]
    fn tier_one_wins_over_tier_two_on_equal_span() {
        let spans = vec![
            span("HEURISTIC", 0, 5, 2, Source::Regex),
            span("STRUCTURAL", 0, 5, 1, Source::Regex),
        ];
        let resolved = resolve_conflicts(spans);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].label, "STRUCTURAL");
    }

    #[test]
    fn regex_wins_over_model_on_equal_span_and_tier() {
        let spans = vec![
            span("MODEL_NAME", 0, 5, 1, Source::Model),
            span("REGEX_NAME", 0, 5, 1, Source::Regex),
        ];
        let resolved = resolve_conflicts(spans);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].label, "REGEX_NAME");
    }

    #[test]
    fn result_is_always_ascending_and_non_overlapping() {
        let spans = vec![
            span("B", 5, 8, 1, Source::Regex),
            span("A", 0, 3, 1, Source::Regex),
            span("C", 20, 25, 1, Source::Regex),
        ];
        let resolved = resolve_conflicts(spans);
        let starts: Vec<usize> = resolved.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 5, 20]);
        for w in resolved.windows(2) {
            assert!(w[0].end <= w[1].start);
        }
    }
}
