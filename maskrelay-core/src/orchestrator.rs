//! The Sanitizer Orchestrator: wires the Pattern Registry, Entity Recognizer,
//! Format Parser Set, Detection Engine, and Placeholder Engine together into
//! the single public `sanitize`/`rehydrate` entry points.
//! License: Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::audit::{AuditLog, AuditRecord};
use crate::config::Config;
use crate::detect::{detect_in_fragment, Warning};
use crate::error::MaskError;
use crate::parser::{self, DetectedFormat, Locator, ParseOutcome};
use crate::pattern::Registry;
use crate::placeholder::{Masker, RehydrationMap};
use crate::recognizer::{EntityRecognizer, NullRecognizer};
use crate::store::SessionStore;

/// A non-authoritative rollup of how many spans were masked under each
/// label, for callers that want a quick report without walking the full
/// `RehydrationMap`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSummary {
    pub label: String,
    pub occurrences: usize,
}

/// The full result of a `sanitize` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeResult {
    pub output: String,
    pub map: RehydrationMap,
    pub summary: Vec<LabelSummary>,
    pub warnings: Vec<Warning>,
}

/// Owns the registry, recognizer, and optional audit log / session store
/// collaborators. Holds no global state; every value here is instance-owned.
pub struct Sanitizer {
    config: Config,
    registry: Registry,
    recognizer: Arc<dyn EntityRecognizer>,
    audit_log: Option<Mutex<AuditLog>>,
    store: Option<Arc<dyn SessionStore>>,
}

impl Sanitizer {
    /// Builds a `Sanitizer` from a `Config`, loading and compiling the
    /// configured pattern packs and, if `config.audit_log_path` is set,
    /// opening the audit log. Uses the `NullRecognizer` since this crate
    /// ships no model-backed adapter; callers that have one can build a
    /// `Sanitizer` with `with_recognizer` instead.
    pub fn new(config: Config) -> Result<Self, MaskError> {
        Self::with_recognizer(config, Arc::new(NullRecognizer))
    }

    pub fn with_recognizer(
        config: Config,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Result<Self, MaskError> {
        let registry = Registry::load(&config.pattern_packs, &[], config.pattern_pack_dir.as_deref())?;
        let audit_log = match &config.audit_log_path {
            Some(path) => Some(Mutex::new(AuditLog::open(path)?)),
            None => None,
        };

        Ok(Self {
            registry,
            recognizer,
            audit_log,
            store: None,
            config,
        })
    }

    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Masks detected sensitive spans in `input`, returning the sanitized
    /// output, the `RehydrationMap` needed to reverse it, a label summary,
    /// and any non-fatal warnings raised along the way.
    pub fn sanitize(&self, input: &str) -> Result<SanitizeResult, MaskError> {
        if input.chars().count() > self.config.max_input_characters {
            return Err(MaskError::InputTooLarge {
                max: self.config.max_input_characters,
                actual: input.chars().count(),
            });
        }

        let format = parser::select_format(input, self.config.format_hint);
        let (outcome, fell_back) = parser::parse(input, format)?;
        let mut warnings = Vec::new();
        if fell_back {
            warnings.push(Warning::ParserFallback);
        }

        let fragments: &[crate::parser::Fragment] = match &outcome {
            ParseOutcome::Plain { fragments } => fragments,
            ParseOutcome::Structured { fragments, .. } => fragments,
            ParseOutcome::Markup { fragments } => fragments,
        };

        let mut masker = Masker::new(&self.config.placeholder_prefix, &self.config.placeholder_suffix);
        let mut replacements: Vec<(Locator, String)> = Vec::new();

        for fragment in fragments {
            let (spans, frag_warnings) =
                detect_in_fragment(&fragment.text, &self.registry, self.recognizer.as_ref(), &self.config);
            for warning in frag_warnings {
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }

            if spans.is_empty() {
                continue;
            }

            let mut rebuilt = String::with_capacity(fragment.text.len());
            let mut cursor = 0usize;
            for span in &spans {
                rebuilt.push_str(&fragment.text[cursor..span.start]);
                let placeholder = masker.mask(&span.label, &span.text);
                rebuilt.push_str(&placeholder);
                self.record_audit(span, &placeholder);
                cursor = span.end;
            }
            rebuilt.push_str(&fragment.text[cursor..]);

            replacements.push((fragment.locator.clone(), rebuilt));
        }

        let output = parser::reconstruct(input, &outcome, &replacements)?;
        let map = masker.into_map();
        let summary = summarize(&map);

        Ok(SanitizeResult {
            output,
            map,
            summary,
            warnings,
        })
    }

    /// Reverses a prior `sanitize` call's output using its `RehydrationMap`.
    pub fn rehydrate(&self, text: &str, map: &RehydrationMap) -> String {
        map.rehydrate(text)
    }

    /// Persists `map` under `session_id` via the configured store.
    pub fn persist_session(&self, session_id: &str, map: &RehydrationMap) -> Result<(), MaskError> {
        match &self.store {
            Some(store) => store.put(session_id, map),
            None => Err(MaskError::SessionNotFound(session_id.to_string())),
        }
    }

    /// Reverses `text` using the map stored under `session_id`.
    pub fn rehydrate_session(&self, session_id: &str, text: &str) -> Result<String, MaskError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| MaskError::SessionNotFound(session_id.to_string()))?;
        let map = store.get(session_id)?;
        Ok(map.rehydrate(text))
    }

    fn record_audit(&self, span: &crate::span::Span, placeholder: &str) {
        if let Some(audit_log) = &self.audit_log {
            let record = AuditRecord::new(&span.label, placeholder, &span.text, span.start, span.end);
            if let Ok(mut log) = audit_log.lock() {
                if let Err(e) = log.append(&record) {
                    log::warn!("failed to append audit record: {}", e);
                }
            }
        }
    }
}

fn summarize(map: &RehydrationMap) -> Vec<LabelSummary> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in map.iter() {
        *counts.entry(entry.label.clone()).or_insert(0) += 1;
    }
    let mut summary: Vec<LabelSummary> = counts
        .into_iter()
        .map(|(label, occurrences)| LabelSummary { label, occurrences })
        .collect();
    summary.sort_by(|a, b| a.label.cmp(&b.label));
    summary
}
