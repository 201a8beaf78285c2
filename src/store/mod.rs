//! Saved Issue Store
//!
//! Keeps named snapshots of the content model in a single storage slot as a
//! JSON array of `{id, name, data}` records. The whole collection is read
//! once when the store opens and written back in full on every save.
//!
//! Opening never fails: a missing slot is an empty store, and a slot that
//! cannot be read or parsed is logged and treated as empty.

mod storage;

pub use storage::{FileStorage, MemoryStorage, StoragePort};

use crate::error::{Error, Result};
use crate::model::{ContentModel, SavedIssue};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, error, info};

// ─────────────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────────────

/// Source of the creation time used for issue ids and default names.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Issue Store
// ─────────────────────────────────────────────────────────────────────────────

/// The saved issue collection, backed by one storage slot.
pub struct IssueStore<S: StoragePort> {
    storage: S,
    key: String,
    issues: Vec<SavedIssue>,
    clock: Box<dyn Clock>,
}

impl<S: StoragePort> IssueStore<S> {
    /// Open the store using the system clock.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        Self::open_with_clock(storage, key, Box::new(SystemClock))
    }

    /// Open the store with an explicit clock.
    pub fn open_with_clock(storage: S, key: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        let key = key.into();
        let issues = match read_issues(&storage, &key) {
            Ok(issues) => {
                info!("Loaded {} saved issue(s) from '{}'", issues.len(), key);
                issues
            }
            Err(e) => {
                error!("Ignoring saved issues in '{}': {}", key, e);
                Vec::new()
            }
        };

        Self {
            storage,
            key,
            issues,
            clock,
        }
    }

    /// Saved issues in the order they were saved.
    pub fn issues(&self) -> &[SavedIssue] {
        &self.issues
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save a snapshot of `model` and write the collection back.
    ///
    /// The issue is named after the model's trimmed `issue_name`, or
    /// `Issue <timestamp>` when that is blank. If the write fails the
    /// collection is left as it was before the call.
    pub fn save(&mut self, model: &ContentModel) -> Result<SavedIssue> {
        let now = self.clock.now();

        let mut id_millis = now.timestamp_millis();
        while self.contains(&id_millis.to_string()) {
            id_millis += 1;
        }

        let name = match model.issue_name.trim() {
            "" => format!("Issue {}", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            trimmed => trimmed.to_string(),
        };

        let issue = SavedIssue {
            id: id_millis.to_string(),
            name,
            data: model.clone(),
        };

        self.issues.push(issue.clone());
        if let Err(e) = self.persist() {
            self.issues.pop();
            return Err(e);
        }

        info!("Saved issue '{}' ({})", issue.name, issue.id);
        Ok(issue)
    }

    /// Copy of the snapshot saved under `id`.
    pub fn load(&self, id: &str) -> Option<ContentModel> {
        let found = self
            .issues
            .iter()
            .find(|issue| issue.id == id)
            .map(|issue| issue.data.clone());
        if found.is_none() {
            debug!("No saved issue with id {}", id);
        }
        found
    }

    fn contains(&self, id: &str) -> bool {
        self.issues.iter().any(|issue| issue.id == id)
    }

    fn persist(&mut self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.issues).map_err(|e| Error::StorageWrite {
            key: self.key.clone(),
            source: Box::new(e),
        })?;
        self.storage.write(&self.key, &bytes)
    }
}

/// Read and parse the collection stored under `key`.
fn read_issues<S: StoragePort>(storage: &S, key: &str) -> Result<Vec<SavedIssue>> {
    let Some(bytes) = storage.read(key)? else {
        return Ok(Vec::new());
    };

    let mut issues: Vec<SavedIssue> =
        serde_json::from_slice(&bytes).map_err(|source| Error::StoreParse {
            key: key.to_string(),
            source,
        })?;
    for issue in &mut issues {
        issue.data.sanitize();
    }
    Ok(issues)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    const KEY: &str = "portPulseIssues_v2";

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_clock() -> Box<dyn Clock> {
        Box::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap(),
        ))
    }

    struct FailingStorage;

    impl StoragePort for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn write(&mut self, key: &str, _bytes: &[u8]) -> Result<()> {
            Err(Error::StorageWrite {
                key: key.to_string(),
                source: "quota exceeded".into(),
            })
        }
    }

    #[test]
    fn test_open_missing_slot_is_empty() {
        let store = IssueStore::open(MemoryStorage::new(), KEY);
        assert!(store.issues().is_empty());
    }

    #[test]
    fn test_open_corrupt_slot_is_empty() {
        let storage = MemoryStorage::with_slot(KEY, "{not json");
        let store = IssueStore::open(storage, KEY);
        assert!(store.issues().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = IssueStore::open_with_clock(MemoryStorage::new(), KEY, fixed_clock());
        let mut model = ContentModel::sample();
        model.issue_name = "  December Edition  ".to_string();

        let saved = store.save(&model).unwrap();
        assert_eq!(saved.name, "December Edition");
        assert_eq!(saved.id, "1764583200000");
        assert_eq!(store.load(&saved.id), Some(model));
    }

    #[test]
    fn test_blank_name_gets_timestamp_name() {
        let mut store = IssueStore::open_with_clock(MemoryStorage::new(), KEY, fixed_clock());
        let mut model = ContentModel::default();
        model.issue_name = "   ".to_string();

        let saved = store.save(&model).unwrap();
        assert_eq!(saved.name, "Issue 2025-12-01T10:00:00.000Z");
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let mut store = IssueStore::open_with_clock(MemoryStorage::new(), KEY, fixed_clock());
        let model = ContentModel::default();

        let first = store.save(&model).unwrap();
        let second = store.save(&model).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.id, "1764583200001");
    }

    #[test]
    fn test_snapshot_is_independent_of_live_model() {
        let mut store = IssueStore::open(MemoryStorage::new(), KEY);
        let mut model = ContentModel::sample();
        let saved = store.save(&model).unwrap();

        model.newsletter_name = "Changed".to_string();
        let loaded = store.load(&saved.id).unwrap();
        assert_ne!(loaded.newsletter_name, "Changed");
    }

    #[test]
    fn test_load_unknown_id_is_none() {
        let store = IssueStore::open(MemoryStorage::new(), KEY);
        assert_eq!(store.load("42"), None);
    }

    #[test]
    fn test_collection_is_written_as_json_array() {
        let mut store = IssueStore::open_with_clock(MemoryStorage::new(), KEY, fixed_clock());
        let mut model = ContentModel::default();
        model.issue_name = "One".to_string();
        store.save(&model).unwrap();

        let bytes = store.storage().read(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "1764583200000");
        assert_eq!(records[0]["name"], "One");
        assert!(records[0]["data"]["newsletterName"].is_string());
    }

    #[test]
    fn test_failed_write_leaves_collection_unchanged() {
        let mut store = IssueStore::open(FailingStorage, KEY);
        let result = store.save(&ContentModel::default());
        assert!(matches!(result, Err(Error::StorageWrite { .. })));
        assert!(store.issues().is_empty());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let temp = TempDir::new().unwrap();

        let mut store = IssueStore::open(FileStorage::new(temp.path()), KEY);
        let mut model = ContentModel::sample();
        model.issue_name = "Persisted".to_string();
        let saved = store.save(&model).unwrap();

        let reopened = IssueStore::open(FileStorage::new(temp.path()), KEY);
        assert_eq!(reopened.issues().len(), 1);
        assert_eq!(reopened.issues()[0].name, "Persisted");
        assert_eq!(reopened.load(&saved.id), Some(model));
    }

    #[test]
    fn test_corrupt_file_storage_yields_empty_store() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(format!("{}.json", KEY)), "[{\"id\":").unwrap();

        let store = IssueStore::open(FileStorage::new(temp.path()), KEY);
        assert!(store.issues().is_empty());
    }
}
