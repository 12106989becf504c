//! The Placeholder Engine (Masker): turns detected spans into deterministic,
//! reversible placeholder tokens and builds the `RehydrationMap` that
//! reverses them.
//!
//! Placeholders are content-addressed: a SHA-256 digest of the matched
//! text, hex-encoded and truncated, combined with a per-label ordinal
//! counter, so the same text always maps to the same placeholder within a
//! call and distinct texts never collide.
//! License: Apache-2.0

use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SHORT_DIGEST_LEN: usize = 6;
const WIDE_DIGEST_LEN: usize = 10;

/// One reversible mapping from a placeholder token back to the original
/// text it replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehydrationEntry {
    pub placeholder: String,
    pub original_text: String,
    pub label: String,
    pub ordinal: usize,
}

/// An ordered association of placeholder to `RehydrationEntry`, produced
/// once per sanitize call. Serializes as a key/value document in
/// first-appearance (insertion) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RehydrationMap {
    entries: Vec<RehydrationEntry>,
}

impl RehydrationMap {
    pub fn get(&self, placeholder: &str) -> Option<&RehydrationEntry> {
        self.entries.iter().find(|e| e.placeholder == placeholder)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RehydrationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full-fidelity entry list (including label and ordinal), used for
    /// session-store persistence. The `Serialize` impl above is the
    /// public, on-the-wire placeholder-to-text shape; this is the
    /// crate-internal round-trip representation the store needs to
    /// reconstruct an equivalent map exactly.
    pub fn entries(&self) -> &[RehydrationEntry] {
        &self.entries
    }

    pub fn from_entries(entries: Vec<RehydrationEntry>) -> Self {
        Self { entries }
    }

    /// All placeholder strings, longest first. Rehydration must replace
    /// longer placeholders before shorter ones in case one is a substring
    /// of another (e.g. after digest widening).
    fn placeholders_longest_first(&self) -> Vec<&str> {
        let mut placeholders: Vec<&str> = self.entries.iter().map(|e| e.placeholder.as_str()).collect();
        placeholders.sort_by_key(|p| std::cmp::Reverse(p.len()));
        placeholders
    }

    /// Reverses every placeholder occurrence in `text` back to its original
    /// substring. Unknown placeholder-shaped tokens are left untouched.
    pub fn rehydrate(&self, text: &str) -> String {
        let mut output = text.to_string();
        for placeholder in self.placeholders_longest_first() {
            if let Some(entry) = self.get(placeholder) {
                output = output.replace(placeholder, &entry.original_text);
            }
        }
        output
    }
}

impl Serialize for RehydrationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.placeholder, &entry.original_text)?;
        }
        map.end()
    }
}

/// Stateful placeholder generator, scoped to a single `sanitize` call. State
/// spans every fragment of the call so ordinal counters and digest-collision
/// tracking are call-wide rather than per-fragment.
pub struct Masker {
    prefix: String,
    suffix: String,
    by_pair: HashMap<(String, String), String>,
    ordinals: HashMap<String, usize>,
    digests_in_use: HashMap<String, HashMap<String, String>>,
    map: RehydrationMap,
}

impl Masker {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            by_pair: HashMap::new(),
            ordinals: HashMap::new(),
            digests_in_use: HashMap::new(),
            map: RehydrationMap::default(),
        }
    }

    /// Returns the placeholder for `(label, text)`, reusing a previously
    /// assigned one if this exact pair has already appeared in the call.
    pub fn mask(&mut self, label: &str, text: &str) -> String {
        let key = (label.to_string(), text.to_string());
        if let Some(existing) = self.by_pair.get(&key) {
            return existing.clone();
        }

        let digest = self.digest_for(label, text);
        let ordinal = {
            let counter = self.ordinals.entry(label.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };

        let placeholder = format!("{}{}_{}_{}{}", self.prefix, label, digest, ordinal, self.suffix);

        self.by_pair.insert(key, placeholder.clone());
        self.map.entries.push(RehydrationEntry {
            placeholder: placeholder.clone(),
            original_text: text.to_string(),
            label: label.to_string(),
            ordinal,
        });

        placeholder
    }

    /// Computes this pair's hex digest, widening from 6 to 10 characters if
    /// a distinct pair under the same label already claimed the 6-character
    /// digest.
    fn digest_for(&mut self, label: &str, text: &str) -> String {
        let full = hex::encode(Sha256::digest(text.as_bytes()));
        let short = full[..SHORT_DIGEST_LEN].to_string();

        let label_digests = self.digests_in_use.entry(label.to_string()).or_default();
        match label_digests.get(&short) {
            None => {
                label_digests.insert(short.clone(), text.to_string());
                short
            }
            Some(owner) if owner == text => short,
            Some(_) => full[..WIDE_DIGEST_LEN].to_string(),
        }
    }

    pub fn into_map(self) -> RehydrationMap {
        self.map
    }
}
