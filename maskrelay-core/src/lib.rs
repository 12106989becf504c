//! # maskrelay-core
//!
//! Masks sensitive identifiers in text, structured (JSON), or markup content
//! with deterministic, reversible placeholders, so content can be forwarded
//! to an untrusted consumer (e.g. an LLM) and later rehydrated back to its
//! original form.
//!
//! ## Modules
//!
//! * `pattern`: pattern pack documents and the compiled rule registry.
//! * `recognizer`: the optional, model-backed entity recognizer adapter.
//! * `parser`: the plain/structured/markup format parser set.
//! * `detect`: the detection engine — regex pass, recognizer pass, filters,
//!   conflict resolution.
//! * `placeholder`: the masker and the `RehydrationMap` it produces.
//! * `orchestrator`: wires the above into `Sanitizer::sanitize`/`rehydrate`.
//! * `store`: session-scoped persistence for `RehydrationMap`s.
//! * `audit`: optional, append-only, plaintext-free audit logging.
//! * `config`: the `Config` document and its recognized options.
//! * `error`: the typed `MaskError` surface.
//!
//! ## Usage
//!
//! ```
//! use maskrelay_core::{Config, Sanitizer};
//!
//! # fn main() -> Result<(), maskrelay_core::MaskError> {
//! let mut config = Config::default();
//! config.regex_only = true;
//!
//! let sanitizer = Sanitizer::new(config)?;
//! let result = sanitizer.sanitize("Contact john.doe@example.com")?;
//! assert!(!result.output.contains("john.doe@example.com"));
//!
//! let original = sanitizer.rehydrate(&result.output, &result.map);
//! assert_eq!(original, "Contact john.doe@example.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## Design principles
//!
//! * No panics cross the public API boundary; every recoverable condition is
//!   a typed `MaskError` or a non-fatal `Warning`.
//! * No global mutable state: every `Sanitizer` owns its own `Config`,
//!   `Registry`, recognizer handle, and collaborators.
//! * The library never initializes a logger; it only emits through the
//!   `log` facade. Initialization is the binary crate's job.
//!
//! License: Apache-2.0

pub mod audit;
pub mod config;
pub mod detect;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod pattern;
pub mod placeholder;
pub mod recognizer;
pub mod span;
pub mod store;

pub use config::{Config, FormatHint};
pub use detect::Warning;
pub use error::{MaskError, Result};
pub use orchestrator::{LabelSummary, SanitizeResult, Sanitizer};
pub use placeholder::{RehydrationEntry, RehydrationMap};
pub use span::{Source, Span};
