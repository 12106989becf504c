//! Typed error surface for `maskrelay-core`.
//!
//! Configuration and pattern-pack problems are fatal at initialization time;
//! input-size problems are fatal at call time; recognizer and parser
//! degradations are non-fatal and are reported as warnings alongside a
//! successful result instead. See `orchestrator::Warning` for the
//! non-fatal side of this taxonomy.
//! License: Apache-2.0

use thiserror::Error;

/// The error surface exposed across the public API boundary.
///
/// No operation in this crate panics across that boundary; every
/// recoverable condition is represented here or, for the genuinely
/// non-fatal cases, folded into a `Warning` instead.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("input exceeds configured maximum of {max} characters (got {actual})")]
    InputTooLarge { max: usize, actual: usize },

    #[error("pattern pack '{pack}' is invalid: {reason}")]
    PatternPackInvalid { pack: String, reason: String },

    #[error("unknown validator '{0}'")]
    ValidatorUnknown(String),

    #[error("unknown configuration option '{0}'")]
    ConfigUnknownOption(String),

    #[error("configuration value out of range: {0}")]
    ConfigOutOfRange(String),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("invalid session id '{0}': must not contain path separators or '..'")]
    InvalidSessionId(String),

    #[error("failed to read pattern pack '{pack}': {source}")]
    PackIo {
        pack: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session store I/O error: {0}")]
    StoreIo(#[source] std::io::Error),

    #[error("session store serialization error: {0}")]
    StoreSerialization(String),

    #[error("structured input nesting exceeds maximum depth of {0}")]
    StructuredDepthExceeded(usize),
}

pub type Result<T> = std::result::Result<T, MaskError>;
