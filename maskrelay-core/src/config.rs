//! The orchestrator's configuration document.
//!
//! There is no module-level default config or embedded singleton:
//! `Config::default()` is an explicit, orchestrator-owned value — no global
//! mutable state.
//! License: Apache-2.0

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::MaskError;

/// Parser selection override for the `format_hint` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    #[default]
    Auto,
    Text,
    Structured,
    Markup,
}

/// The recognized configuration options. Unknown top-level keys and
/// out-of-range numeric values are rejected at load time, never at call
/// time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_pattern_packs")]
    pub pattern_packs: Vec<String>,
    #[serde(default)]
    pub regex_only: bool,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default)]
    pub strict_validation: bool,
    #[serde(default)]
    pub whitelist: HashSet<String>,
    #[serde(default)]
    pub mask_types: HashSet<String>,
    #[serde(default = "default_prefix")]
    pub placeholder_prefix: String,
    #[serde(default = "default_suffix")]
    pub placeholder_suffix: String,
    #[serde(default = "default_max_input_characters")]
    pub max_input_characters: usize,
    #[serde(default)]
    pub format_hint: FormatHint,
    /// When set, every `sanitize` call appends a JSON-Lines audit record to
    /// this path. Ambient observability, not a detection feature.
    #[serde(default)]
    pub audit_log_path: Option<PathBuf>,
    /// Directory searched for any pack in `pattern_packs` other than
    /// `"default"`. A name `foo` resolves to `{pattern_pack_dir}/foo.yaml`.
    #[serde(default)]
    pub pattern_pack_dir: Option<PathBuf>,
}

fn default_pattern_packs() -> Vec<String> {
    vec!["default".to_string()]
}

fn default_min_confidence() -> f64 {
    0.5
}

fn default_prefix() -> String {
    "<<".to_string()
}

fn default_suffix() -> String {
    ">>".to_string()
}

fn default_max_input_characters() -> usize {
    1_000_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern_packs: default_pattern_packs(),
            regex_only: false,
            min_confidence: default_min_confidence(),
            strict_validation: false,
            whitelist: HashSet::new(),
            mask_types: HashSet::new(),
            placeholder_prefix: default_prefix(),
            placeholder_suffix: default_suffix(),
            max_input_characters: default_max_input_characters(),
            format_hint: FormatHint::Auto,
            audit_log_path: None,
            pattern_pack_dir: None,
        }
    }
}

impl Config {
    /// Parses a YAML configuration document. Unknown top-level keys are
    /// rejected by the `deny_unknown_fields` derive above and reported as
    /// `ConfigUnknownOption`; out-of-range numeric values are checked
    /// explicitly in `validate` since serde has no notion of a bounded
    /// float, and are reported as `ConfigOutOfRange`.
    pub fn from_yaml(yaml: &str) -> Result<Self, MaskError> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            let message = e.to_string();
            if message.contains("unknown field") {
                MaskError::ConfigUnknownOption(message)
            } else {
                MaskError::ConfigOutOfRange(message)
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), MaskError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(MaskError::ConfigOutOfRange(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.max_input_characters == 0 {
            return Err(MaskError::ConfigOutOfRange(
                "max_input_characters must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();
        assert_eq!(config.pattern_packs, vec!["default".to_string()]);
        assert!(!config.regex_only);
        assert_eq!(config.placeholder_prefix, "<<");
        assert_eq!(config.placeholder_suffix, ">>");
        assert_eq!(config.format_hint, FormatHint::Auto);
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let yaml = "regex_only: true\nbogus_option: 5\n";
        assert!(matches!(Config::from_yaml(yaml), Err(MaskError::ConfigUnknownOption(_))));
    }

    #[test]
    fn out_of_range_min_confidence_is_rejected() {
        let yaml = "min_confidence: 1.5\n";
        assert!(matches!(Config::from_yaml(yaml), Err(MaskError::ConfigOutOfRange(_))));
    }

    #[test]
    fn zero_max_input_characters_is_rejected() {
        let yaml = "max_input_characters: 0\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let yaml = "regex_only: true\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.regex_only);
        assert_eq!(config.max_input_characters, default_max_input_characters());
    }
}
