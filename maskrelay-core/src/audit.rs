//! An optional, append-only audit log for sanitize calls.
//!
//! No plaintext ever reaches disk: only the label, span position, and a
//! content hash of the masked substring are recorded, never
//! `original_text` itself.
//! License: Apache-2.0

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::MaskError;

/// A single audit record for one masked span. Contains no plaintext; only
/// a hash of the matched substring, suitable for correlating repeated
/// occurrences without reconstructing the original value.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub label: String,
    pub placeholder: String,
    pub content_hash: String,
    pub start: usize,
    pub end: usize,
}

impl AuditRecord {
    pub fn new(label: &str, placeholder: &str, matched_text: &str, start: usize, end: usize) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            content_hash: hex::encode(Sha256::digest(matched_text.as_bytes())),
            start,
            end,
        }
    }
}

/// Manages an append-only JSON-Lines audit log file.
pub struct AuditLog {
    path: PathBuf,
    writer: BufWriter<fs::File>,
}

impl AuditLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MaskError> {
        let path_buf = path.as_ref().to_path_buf();
        if let Some(parent) = path_buf.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(MaskError::StoreIo)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path_buf)
            .map_err(MaskError::StoreIo)?;

        Ok(Self {
            path: path_buf,
            writer: BufWriter::new(file),
        })
    }

    pub fn append(&mut self, record: &AuditRecord) -> Result<(), MaskError> {
        let json_line = serde_json::to_string(record).map_err(|e| MaskError::StoreSerialization(e.to_string()))?;
        self.writer.write_all(json_line.as_bytes()).map_err(MaskError::StoreIo)?;
        self.writer.write_all(b"\n").map_err(MaskError::StoreIo)?;
        self.writer.flush().map_err(MaskError::StoreIo)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            log::error!("failed to flush audit log writer: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appended_record_never_contains_plaintext() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let mut log = AuditLog::open(&path).unwrap();

        let record = AuditRecord::new("EMAIL", "<<EMAIL_abc123_1>>", "john.doe@example.com", 8, 29);
        log.append(&record).unwrap();
        drop(log);

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("john.doe@example.com"));
        assert!(content.contains("EMAIL"));
    }

    #[test]
    fn append_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");
        let mut log = AuditLog::open(&path).unwrap();
        let record = AuditRecord::new("PHONE", "<<PHONE_abc123_1>>", "555-123-4567", 0, 12);
        log.append(&record).unwrap();
        assert!(path.exists());
    }
}
