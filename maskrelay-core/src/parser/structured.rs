//! The structured parser: walks a `serde_json::Value` tree, masking only
//! string leaves and leaving keys and non-string leaves untouched.
//! License: Apache-2.0

use std::collections::HashMap;

use serde_json::Value;

use super::{Fragment, Locator, PathSegment, MAX_STRUCTURED_DEPTH};
use crate::error::MaskError;

/// Parses `input` as JSON and walks it, emitting one Fragment per string
/// leaf. Returns the parsed root alongside the fragment list so the caller
/// can reconstruct from it later without re-parsing.
pub fn parse(input: &str, max_depth: usize) -> Result<(Value, Vec<Fragment>), MaskError> {
    let root: Value = serde_json::from_str(input)
        .map_err(|e| MaskError::PatternPackInvalid {
            pack: "<structured-input>".to_string(),
            reason: e.to_string(),
        })?;

    let mut fragments = Vec::new();
    walk(&root, &mut Vec::new(), 0, max_depth, &mut fragments)?;
    Ok((root, fragments))
}

fn walk(
    value: &Value,
    path: &mut Vec<PathSegment>,
    depth: usize,
    max_depth: usize,
    fragments: &mut Vec<Fragment>,
) -> Result<(), MaskError> {
    if depth > max_depth {
        return Err(MaskError::StructuredDepthExceeded(max_depth));
    }

    match value {
        Value::String(s) => {
            fragments.push(Fragment {
                text: s.clone(),
                locator: Locator::Path(path.clone()),
            });
        }
        Value::Object(map) => {
            for (key, child) in map {
                path.push(PathSegment::Key(key.clone()));
                walk(child, path, depth + 1, max_depth, fragments)?;
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                walk(child, path, depth + 1, max_depth, fragments)?;
                path.pop();
            }
        }
        // Numbers, booleans, and null are passed through untouched.
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
    Ok(())
}

/// Returns a deep copy of `root` with every string leaf named by
/// `replacements` swapped in; leaves with no corresponding replacement, and
/// all non-string leaves, are carried over unchanged.
pub fn reconstruct(root: &Value, replacements: &[(Locator, String)]) -> Value {
    let mut by_path: HashMap<Vec<PathSegment>, String> = HashMap::new();
    for (locator, text) in replacements {
        if let Locator::Path(path) = locator {
            by_path.insert(path.clone(), text.clone());
        }
    }

    let mut result = root.clone();
    apply(&mut result, &mut Vec::new(), &by_path);
    result
}

fn apply(value: &mut Value, path: &mut Vec<PathSegment>, by_path: &HashMap<Vec<PathSegment>, String>) {
    match value {
        Value::String(s) => {
            if let Some(replacement) = by_path.get(path) {
                *s = replacement.clone();
            }
        }
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                path.push(PathSegment::Key(key.clone()));
                apply(child, path, by_path);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                path.push(PathSegment::Index(index));
                apply(child, path, by_path);
                path.pop();
            }
        }
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walks_nested_object_and_captures_string_leaves_only() {
        let input = r#"{"user": {"email": "a@b.co"}, "count": 3}"#;
        let (_, fragments) = parse(input, MAX_STRUCTURED_DEPTH).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "a@b.co");
    }

    #[test]
    fn non_string_leaves_survive_reconstruction_untouched() {
        let input = r#"{"count": 3, "active": true, "missing": null}"#;
        let (root, fragments) = parse(input, MAX_STRUCTURED_DEPTH).unwrap();
        assert!(fragments.is_empty());
        let result = reconstruct(&root, &[]);
        assert_eq!(result, json!({"count": 3, "active": true, "missing": null}));
    }

    #[test]
    fn repeated_value_at_two_locators_can_mask_independently() {
        let input = r#"{"a": "x@y.co", "b": "x@y.co"}"#;
        let (root, fragments) = parse(input, MAX_STRUCTURED_DEPTH).unwrap();
        assert_eq!(fragments.len(), 2);
        let replacements = vec![
            (fragments[0].locator.clone(), "<<EMAIL_1>>".to_string()),
            (fragments[1].locator.clone(), "<<EMAIL_1>>".to_string()),
        ];
        let result = reconstruct(&root, &replacements);
        assert_eq!(result, json!({"a": "<<EMAIL_1>>", "b": "<<EMAIL_1>>"}));
    }

    #[test]
    fn array_indices_are_tracked_in_locator_path() {
        let input = r#"["a@b.co", "plain"]"#;
        let (_, fragments) = parse(input, MAX_STRUCTURED_DEPTH).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].locator, Locator::Path(vec![PathSegment::Index(0)]));
    }

    #[test]
    fn depth_cap_is_enforced() {
        let mut input = String::from("\"leaf\"");
        for _ in 0..100 {
            input = format!("[{}]", input);
        }
        let result = parse(&input, MAX_STRUCTURED_DEPTH);
        assert!(matches!(result, Err(MaskError::StructuredDepthExceeded(_))));
    }
}
