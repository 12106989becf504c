//! An on-disk `SessionStore`: one JSON file per session, written via a
//! temp-file-then-rename so a `get` never observes a partial write.
//! License: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use super::SessionStore;
use crate::error::MaskError;
use crate::placeholder::RehydrationMap;

pub struct DiskStore {
    base_dir: PathBuf,
}

impl DiskStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, MaskError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(MaskError::StoreIo)?;
        Ok(Self { base_dir })
    }

    /// Resolves `session_id` to its backing file path, rejecting any id that
    /// isn't a single plain path component — this is what stops a
    /// caller-supplied id like `../../etc/passwd` from escaping `base_dir`.
    fn session_path(&self, session_id: &str) -> Result<PathBuf, MaskError> {
        let candidate = Path::new(session_id);
        if candidate.file_name().map(|n| n.to_str()) != Some(Some(session_id)) {
            return Err(MaskError::InvalidSessionId(session_id.to_string()));
        }
        Ok(self.base_dir.join(format!("{session_id}.json")))
    }
}

impl SessionStore for DiskStore {
    fn put(&self, session_id: &str, map: &RehydrationMap) -> Result<(), MaskError> {
        let final_path = self.session_path(session_id)?;
        let tmp_path = self.base_dir.join(format!("{session_id}.json.tmp"));

        let json = serde_json::to_vec(map.entries()).map_err(|e| MaskError::StoreSerialization(e.to_string()))?;
        fs::write(&tmp_path, json).map_err(MaskError::StoreIo)?;
        fs::rename(&tmp_path, &final_path).map_err(MaskError::StoreIo)?;
        Ok(())
    }

    fn get(&self, session_id: &str) -> Result<RehydrationMap, MaskError> {
        let path = self.session_path(session_id)?;
        let bytes = fs::read(&path).map_err(|_| MaskError::SessionNotFound(session_id.to_string()))?;
        let entries = serde_json::from_slice(&bytes).map_err(|e| MaskError::StoreSerialization(e.to_string()))?;
        Ok(RehydrationMap::from_entries(entries))
    }

    fn delete(&self, session_id: &str) -> Result<(), MaskError> {
        let path = self.session_path(session_id)?;
        fs::remove_file(&path).map_err(|_| MaskError::SessionNotFound(session_id.to_string()))
    }
}
