//! An in-memory `SessionStore` backed by a mutex-guarded hash map.
//! License: Apache-2.0

use std::collections::HashMap;
use std::sync::Mutex;

use super::SessionStore;
use crate::error::MaskError;
use crate::placeholder::RehydrationMap;

#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<String, RehydrationMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn put(&self, session_id: &str, map: &RehydrationMap) -> Result<(), MaskError> {
        let mut sessions = self.sessions.lock().expect("memory store mutex poisoned");
        sessions.insert(session_id.to_string(), map.clone());
        Ok(())
    }

    fn get(&self, session_id: &str) -> Result<RehydrationMap, MaskError> {
        let sessions = self.sessions.lock().expect("memory store mutex poisoned");
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| MaskError::SessionNotFound(session_id.to_string()))
    }

    fn delete(&self, session_id: &str) -> Result<(), MaskError> {
        let mut sessions = self.sessions.lock().expect("memory store mutex poisoned");
        sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| MaskError::SessionNotFound(session_id.to_string()))
    }
}
