//! Record repository for JSON storage
//!
//! Manages loading and saving records to records.json. Inserts are queued
//! and only written by `commit`, which replaces the file atomically.

use std::path::PathBuf;

use crate::error::TxsealResult;
use crate::models::Record;

use super::file_io::{read_json, write_json_atomic};
use super::memory::MemoryRecordStore;
use super::RecordStore;

/// Serializable record data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecordData {
    records: Vec<Record>,
}

/// File-backed record store
#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    inner: MemoryRecordStore,
}

impl JsonRecordStore {
    /// Create a new record store for a file; call `load` before use
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: MemoryRecordStore::new(),
        }
    }

    /// Create a store and load the file if it exists
    pub fn open(path: PathBuf) -> TxsealResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Load records from disk, dropping any pending inserts
    pub fn load(&self) -> TxsealResult<()> {
        let file_data: RecordData = read_json(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            count = file_data.records.len(),
            "loaded records"
        );
        self.inner.replace_committed(file_data.records)
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Number of inserts waiting for a commit
    pub fn pending_count(&self) -> TxsealResult<usize> {
        self.inner.pending_count()
    }
}

impl RecordStore for JsonRecordStore {
    fn fetch_all_newest_first(&self) -> TxsealResult<Vec<Record>> {
        self.inner.fetch_all_newest_first()
    }

    fn insert(&self, record: Record) -> TxsealResult<()> {
        self.inner.insert(record)
    }

    fn commit(&self) -> TxsealResult<()> {
        // The in-memory view only changes once the file is on disk
        self.inner.commit_with(|records| {
            let file_data = RecordData {
                records: records.to_vec(),
            };
            write_json_atomic(&self.path, &file_data)?;
            tracing::debug!(
                path = %self.path.display(),
                count = file_data.records.len(),
                "committed records"
            );
            Ok(())
        })
    }

    fn discard_pending(&self) -> TxsealResult<()> {
        self.inner.discard_pending()
    }

    fn count(&self) -> TxsealResult<usize> {
        self.inner.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonRecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        let store = JsonRecordStore::new(path);
        (temp_dir, store)
    }

    fn record(name: &str, day: u32, amount: f64) -> Record {
        Record::new(
            name,
            Utc.with_ymd_and_hms(2025, 1, day, 9, 30, 0).unwrap(),
            amount,
            Category::Expense,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_commit_and_reload() {
        let (temp_dir, store) = create_test_store();
        store.load().unwrap();

        store.insert(record("Groceries", 15, 54.2)).unwrap();
        store.insert(record("Rent", 1, 1200.0)).unwrap();
        store.commit().unwrap();

        let reopened = JsonRecordStore::open(temp_dir.path().join("records.json")).unwrap();
        let records = reopened.fetch_all_newest_first().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Groceries");
        assert_eq!(records[0].amount, 54.2);
        assert_eq!(records[1].name, "Rent");
    }

    #[test]
    fn test_uncommitted_inserts_not_written() {
        let (temp_dir, store) = create_test_store();
        store.insert(record("Coffee", 2, 3.5)).unwrap();
        assert_eq!(store.pending_count().unwrap(), 1);

        assert!(!temp_dir.path().join("records.json").exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_failed_commit_leaves_state_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("records.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let store = JsonRecordStore::new(path);
        store.insert(record("Coffee", 2, 3.5)).unwrap();

        let err = store.commit().unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(store.pending_count().unwrap(), 1);
    }

    #[test]
    fn test_load_discards_pending() {
        let (_temp_dir, store) = create_test_store();
        store.insert(record("Coffee", 2, 3.5)).unwrap();

        store.load().unwrap();
        assert_eq!(store.pending_count().unwrap(), 0);
    }
}
