//! In-memory record store
//!
//! Holds committed records and a queue of pending inserts behind `RwLock`s.
//! Also the in-memory half of `JsonRecordStore`.

use std::sync::RwLock;

use crate::error::{TxsealError, TxsealResult};
use crate::models::Record;

use super::RecordStore;

/// Newest first; records with equal dates keep their relative order
pub(crate) fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Record store that lives only in memory
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    committed: RwLock<Vec<Record>>,
    pending: RwLock<Vec<Record>>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds committed records
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            committed: RwLock::new(records),
            pending: RwLock::new(Vec::new()),
        }
    }

    /// Number of inserts waiting for a commit
    pub fn pending_count(&self) -> TxsealResult<usize> {
        let pending = self.pending.read().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(pending.len())
    }

    /// Merge pending records into the committed set once `persist` succeeds
    ///
    /// Both locks are held from the snapshot until the queue is emptied, so an
    /// insert racing a commit waits and lands in the next one. If `persist`
    /// fails nothing changes.
    pub(crate) fn commit_with<F>(&self, persist: F) -> TxsealResult<()>
    where
        F: FnOnce(&[Record]) -> TxsealResult<()>,
    {
        let mut committed = self.committed.write().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut pending = self.pending.write().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut records: Vec<Record> = committed.iter().chain(pending.iter()).cloned().collect();
        sort_newest_first(&mut records);

        persist(&records)?;

        *committed = records;
        pending.clear();
        Ok(())
    }

    /// Replace the committed set and empty the pending queue
    pub(crate) fn replace_committed(&self, records: Vec<Record>) -> TxsealResult<()> {
        let mut committed = self.committed.write().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut pending = self.pending.write().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *committed = records;
        pending.clear();
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn fetch_all_newest_first(&self) -> TxsealResult<Vec<Record>> {
        let committed = self.committed.read().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut records = committed.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn insert(&self, record: Record) -> TxsealResult<()> {
        let mut pending = self.pending.write().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        pending.push(record);
        Ok(())
    }

    fn commit(&self) -> TxsealResult<()> {
        self.commit_with(|_| Ok(()))
    }

    fn discard_pending(&self) -> TxsealResult<()> {
        let mut pending = self.pending.write().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        pending.clear();
        Ok(())
    }

    fn count(&self) -> TxsealResult<usize> {
        let committed = self.committed.read().map_err(|e| {
            TxsealError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(committed.len())
    }
}
