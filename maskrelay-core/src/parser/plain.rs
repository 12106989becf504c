//! The plain text parser: the whole input is a single Fragment.
//! License: Apache-2.0

use super::{Fragment, Locator};

pub fn parse(input: &str) -> Vec<Fragment> {
    vec![Fragment {
        text: input.to_string(),
        locator: Locator::Whole,
    }]
}

/// Returns the single replacement, or the original input unchanged if no
/// replacement was produced (nothing detected).
pub fn reconstruct(input: &str, replacements: &[(Locator, String)]) -> String {
    replacements
        .iter()
        .find(|(locator, _)| *locator == Locator::Whole)
        .map(|(_, text)| text.clone())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_yields_single_whole_fragment() {
        let fragments = parse("hello world");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "hello world");
        assert_eq!(fragments[0].locator, Locator::Whole);
    }

    #[test]
    fn reconstruct_returns_replacement_when_present() {
        let replacements = vec![(Locator::Whole, "replaced".to_string())];
        assert_eq!(reconstruct("original", &replacements), "replaced");
    }

    #[test]
    fn reconstruct_passes_through_when_no_replacement() {
        assert_eq!(reconstruct("original", &[]), "original");
    }
}
