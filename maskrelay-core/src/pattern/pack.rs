//! Pattern pack document schema.
//!
//! A pattern pack is a named, versioned YAML document describing a set of
//! labeled detection rules. Deserialization is tolerant of benign schema
//! extensions at the pattern level (unknown fields are ignored) but strict
//! at the pack root (unknown top-level keys are an error).
//! License: Apache-2.0

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a single regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single labeled rule within a pattern pack, as written in YAML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternDocument {
    /// Uppercase canonical label, e.g. `EMAIL`, `US_SSN`.
    #[serde(alias = "label")]
    pub name: String,
    /// One or more regex alternatives for this label.
    pub patterns: Vec<String>,
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub case_insensitive: bool,
    /// Named validator hook, e.g. `luhn`. `None` means regex-only.
    #[serde(default)]
    pub validator: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Pack-level metadata plus its rule list. The pack root rejects unknown
/// fields; `PatternDocument` does not, so pattern-level schema extensions
/// are silently ignored instead of causing a hard failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PatternPackDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub patterns: Vec<PatternDocument>,
}

impl PatternPackDocument {
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// The crate's built-in pattern pack, embedded at compile time so the
/// library is self-contained.
pub const DEFAULT_PACK_YAML: &str = include_str!("../../patterns/default.yaml");
pub const DEFAULT_PACK_NAME: &str = "default";
