//! The Pattern Registry component: loads, validates, and compiles pattern
//! packs into the ordered rule set the detection engine matches against.
//! License: Apache-2.0

pub mod pack;
pub mod registry;
pub mod validators;

pub use pack::{PatternDocument, PatternPackDocument, DEFAULT_PACK_NAME, DEFAULT_PACK_YAML};
pub use registry::{CompiledRule, Registry};
