//! The Rehydration Store: a keyed, session-scoped persistence layer for
//! `RehydrationMap`s, so a `sanitize` call's map can be handed off and
//! consumed by a later, separate `rehydrate` call.
//! License: Apache-2.0

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::error::MaskError;
use crate::placeholder::RehydrationMap;

/// Atomic per-key persistence for `RehydrationMap`s, keyed by an opaque
/// session identifier. Implementations must not expose partial writes: a
/// `get` either returns the map as last fully `put`, or `SessionNotFound`.
pub trait SessionStore: Send + Sync {
    fn put(&self, session_id: &str, map: &RehydrationMap) -> Result<(), MaskError>;
    fn get(&self, session_id: &str) -> Result<RehydrationMap, MaskError>;
    fn delete(&self, session_id: &str) -> Result<(), MaskError>;
}
