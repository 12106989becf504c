//! Compiles loaded pattern packs into an ordered set of ready-to-run rules,
//! carrying the tier/pack-order/rule-order metadata conflict resolution
//! needs.
//! License: Apache-2.0

use std::fs;
use std::path::Path;

use regex::RegexBuilder;

use crate::error::MaskError;
use crate::pattern::pack::{PatternPackDocument, DEFAULT_PACK_NAME, DEFAULT_PACK_YAML, MAX_PATTERN_LENGTH};
use crate::pattern::validators;

/// A single compiled, ready-to-match rule, positioned within its pack.
#[derive(Clone)]
pub struct CompiledRule {
    pub label: String,
    pub regex: regex::Regex,
    pub tier: u8,
    pub pack_order: usize,
    pub rule_order: usize,
    pub validator: Option<fn(&str) -> bool>,
}

/// An ordered, immutable set of compiled rules drawn from one or more packs.
///
/// Pack order is the order packs were requested in; rule order is each
/// rule's position within its own pack's document. Both participate in the
/// detection engine's deterministic tie-breaking.
#[derive(Clone, Default)]
pub struct Registry {
    rules: Vec<CompiledRule>,
}

impl Registry {
    /// Loads and compiles the named packs, in the order given. `"default"`
    /// resolves to the crate's embedded built-in pack; any other name is
    /// looked up first among `extra_packs` by its `name` field, then, if
    /// `pack_dir` is given, as `{pack_dir}/{name}.yaml` on disk.
    pub fn load(
        pack_names: &[String],
        extra_packs: &[(String, String)],
        pack_dir: Option<&Path>,
    ) -> Result<Self, MaskError> {
        let mut rules = Vec::new();

        for (pack_order, pack_name) in pack_names.iter().enumerate() {
            let yaml = if pack_name == DEFAULT_PACK_NAME {
                DEFAULT_PACK_YAML.to_string()
            } else if let Some((_, content)) = extra_packs.iter().find(|(name, _)| name == pack_name) {
                content.clone()
            } else if let Some(dir) = pack_dir {
                let path = dir.join(format!("{pack_name}.yaml"));
                fs::read_to_string(&path).map_err(|e| MaskError::PackIo {
                    pack: pack_name.clone(),
                    source: e,
                })?
            } else {
                return Err(MaskError::PatternPackInvalid {
                    pack: pack_name.clone(),
                    reason: "pack not found among configured pattern_packs and no pattern_pack_dir is set".to_string(),
                });
            };

            let doc = PatternPackDocument::parse(&yaml).map_err(|e| MaskError::PatternPackInvalid {
                pack: pack_name.clone(),
                reason: e.to_string(),
            })?;

            for (rule_order, pattern_doc) in doc.patterns.iter().enumerate() {
                let validator = match &pattern_doc.validator {
                    Some(name) => Some(validators::resolve(name)?),
                    None => None,
                };
                let tier = pattern_doc.tier.unwrap_or(2);

                for pattern in &pattern_doc.patterns {
                    if pattern.len() > MAX_PATTERN_LENGTH {
                        return Err(MaskError::PatternPackInvalid {
                            pack: pack_name.clone(),
                            reason: format!(
                                "pattern for '{}' exceeds maximum length of {} characters",
                                pattern_doc.name, MAX_PATTERN_LENGTH
                            ),
                        });
                    }
                    let regex = RegexBuilder::new(pattern)
                        .case_insensitive(pattern_doc.case_insensitive)
                        .build()
                        .map_err(|e| MaskError::PatternPackInvalid {
                            pack: pack_name.clone(),
                            reason: format!("invalid regex for '{}': {}", pattern_doc.name, e),
                        })?;

                    rules.push(CompiledRule {
                        label: pattern_doc.name.clone(),
                        regex,
                        tier,
                        pack_order,
                        rule_order,
                        validator,
                    });
                }
            }
        }

        Ok(Self { rules })
    }

    /// Loads only the built-in default pack. Convenience for callers that
    /// don't configure `pattern_packs`.
    pub fn default_only() -> Result<Self, MaskError> {
        Self::load(&[DEFAULT_PACK_NAME.to_string()], &[], None)
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pack_loads_and_compiles() {
        let registry = Registry::default_only().expect("default pack should load");
        assert!(!registry.rules().is_empty());
        assert!(registry.rules().iter().any(|r| r.label == "EMAIL"));
    }

    #[test]
    fn credit_card_rule_carries_luhn_validator() {
        let registry = Registry::default_only().unwrap();
        let rule = registry
            .rules()
            .iter()
            .find(|r| r.label == "CREDIT_CARD_NUMBER")
            .expect("CREDIT_CARD_NUMBER rule should exist");
        assert!(rule.validator.is_some());
    }

    #[test]
    fn unknown_pack_name_is_rejected() {
        let result = Registry::load(&["nonexistent".to_string()], &[], None);
        assert!(matches!(result, Err(MaskError::PatternPackInvalid { .. })));
    }

    #[test]
    fn malformed_pack_document_is_rejected() {
        let bad = ("custom".to_string(), "name: custom\nversion: \"1.0\"\nunknown_field: true\npatterns: []".to_string());
        let result = Registry::load(&["custom".to_string()], &[bad], None);
        assert!(result.is_err());
    }

    #[test]
    fn extra_pack_supplied_in_memory_is_loaded() {
        let custom = (
            "custom".to_string(),
            "name: custom\nversion: \"1.0\"\npatterns:\n  - name: WIDGET_ID\n    patterns:\n      - 'W-\\d+'\n"
                .to_string(),
        );
        let registry = Registry::load(&["custom".to_string()], &[custom], None).unwrap();
        assert!(registry.rules().iter().any(|r| r.label == "WIDGET_ID"));
    }

    #[test]
    fn pack_name_not_found_anywhere_without_pack_dir_is_rejected() {
        let result = Registry::load(&["not_default".to_string()], &[], None);
        assert!(matches!(result, Err(MaskError::PatternPackInvalid { .. })));
    }

    #[test]
    fn pack_missing_from_pack_dir_surfaces_as_pack_io() {
        let dir = tempfile::tempdir().unwrap();
        let result = Registry::load(&["not_on_disk".to_string()], &[], Some(dir.path()));
        assert!(matches!(result, Err(MaskError::PackIo { .. })));
    }

    #[test]
    fn pack_loaded_from_directory_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("custom.yaml"),
            "name: custom\nversion: \"1.0\"\npatterns:\n  - name: TICKET_ID\n    patterns:\n      - 'T-\\d+'\n",
        )
        .unwrap();

        let registry = Registry::load(&["custom".to_string()], &[], Some(dir.path())).unwrap();
        assert!(registry.rules().iter().any(|r| r.label == "TICKET_ID"));
    }

    #[test]
    fn pack_and_rule_order_are_preserved() {
        let registry = Registry::default_only().unwrap();
        let email_order = registry
            .rules()
            .iter()
            .find(|r| r.label == "EMAIL")
            .unwrap()
            .rule_order;
        assert_eq!(email_order, 0);
    }
}
