//! Storage ports for the issue store.
//!
//! The store only needs a named slot it can read and overwrite as a whole,
//! so that is all a port offers. `MemoryStorage` backs tests and embedded
//! hosts; `FileStorage` keeps one JSON file per slot on disk.

use crate::config::{write_via_backup, APP_NAME};
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A key-value slot store.
pub trait StoragePort {
    /// Read the slot, `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the slot's contents.
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory storage
// ─────────────────────────────────────────────────────────────────────────────

/// Storage that lives only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with one slot already filled.
    pub fn with_slot(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(key.to_string(), bytes.into());
        storage
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File storage
// ─────────────────────────────────────────────────────────────────────────────

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the platform data directory
    /// (e.g. `~/.local/share/newsletter-builder/` on Linux).
    pub fn default_location() -> Result<Self> {
        dirs::data_dir()
            .map(|base| Self::new(base.join(APP_NAME)))
            .ok_or_else(|| Error::Application("Data directory not found".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_stem))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.slot_path(key);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No storage file at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(Error::StorageRead {
                key: key.to_string(),
                source: Box::new(e),
            }),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.slot_path(key);
        write_via_backup(&path, bytes).map_err(|e| Error::StorageWrite {
            key: key.to_string(),
            source: Box::new(e),
        })?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);
        storage.write("k", b"[]").unwrap();
        assert_eq!(storage.read("k").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().join("nested"));

        assert_eq!(storage.read("portPulseIssues_v2").unwrap(), None);
        storage.write("portPulseIssues_v2", b"[1]").unwrap();
        storage.write("portPulseIssues_v2", b"[1,2]").unwrap();

        assert_eq!(storage.read("portPulseIssues_v2").unwrap(), Some(b"[1,2]".to_vec()));
        assert!(temp.path().join("nested/portPulseIssues_v2.json").exists());
        assert!(!temp.path().join("nested/portPulseIssues_v2.json.bak").exists());
    }

    #[test]
    fn test_file_storage_key_is_file_safe() {
        let storage = FileStorage::new("/tmp/x");
        assert_eq!(
            storage.slot_path("../issues v2"),
            PathBuf::from("/tmp/x/___issues_v2.json")
        );
    }
}
