//! Background dispatch for exports and imports
//!
//! Each operation runs on its own named thread and owns its passphrase; the
//! passphrase is dropped, and therefore wiped, when the thread finishes.
//! Nothing here serializes an export against an import on the same store:
//! callers run one operation at a time.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::crypto::SecureString;
use crate::error::{TxsealError, TxsealResult};
use crate::storage::RecordStore;

use super::export::{export_to_file, ExportSummary};
use super::import::import_from_file;

/// Handle to a transfer running on a worker thread
#[derive(Debug)]
pub struct TransferHandle<T> {
    handle: JoinHandle<TxsealResult<T>>,
}

impl<T> TransferHandle<T> {
    /// Wait for the worker and return its result
    ///
    /// A panic on the worker becomes an error instead of unwinding here.
    pub fn join(self) -> TxsealResult<T> {
        self.handle
            .join()
            .map_err(|_| TxsealError::Worker("transfer worker panicked".to_string()))?
    }
}

fn spawn<T, F>(name: &str, job: F) -> TxsealResult<TransferHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> TxsealResult<T> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(job)
        .map_err(|e| TxsealError::Worker(format!("Failed to start {}: {}", name, e)))?;

    Ok(TransferHandle { handle })
}

/// Export every record to `path` on a worker thread
pub fn spawn_export(
    store: Arc<dyn RecordStore>,
    passphrase: SecureString,
    path: PathBuf,
) -> TxsealResult<TransferHandle<ExportSummary>> {
    spawn("txseal-export", move || {
        export_to_file(store.as_ref(), &passphrase, &path)
    })
}

/// Import the sealed file at `path` on a worker thread
pub fn spawn_import(
    store: Arc<dyn RecordStore>,
    passphrase: SecureString,
    path: PathBuf,
) -> TxsealResult<TransferHandle<usize>> {
    spawn("txseal-import", move || {
        import_from_file(&path, &passphrase, store.as_ref())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Record};
    use crate::storage::MemoryRecordStore;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn record(name: &str, day: u32) -> Record {
        Record::new(
            name,
            Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap(),
            day as f64,
            Category::Income,
        )
    }

    #[test]
    fn test_export_then_import_on_workers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Transactions");

        let source: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::with_records(vec![
            record("a", 1),
            record("b", 2),
        ]));
        let summary = spawn_export(source.clone(), SecureString::new("pw"), path.clone())
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(summary.record_count, 2);

        // Same store: exporting never changes it, importing doubles it
        let count = spawn_import(source.clone(), SecureString::new("pw"), path.clone())
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(source.count().unwrap(), 4);

        let target: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
        let count = spawn_import(target.clone(), SecureString::new("pw"), path)
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(target.fetch_all_newest_first().unwrap()[0].name, "b");
    }

    #[test]
    fn test_worker_error_is_returned() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Transactions");
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::with_records(vec![record("a", 1)]));

        spawn_export(store.clone(), SecureString::new("right"), path.clone())
            .unwrap()
            .join()
            .unwrap();

        let err = spawn_import(store.clone(), SecureString::new("wrong"), path)
            .unwrap()
            .join()
            .unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_panicking_worker_becomes_error() {
        let handle = spawn::<(), _>("txseal-test", || panic!("boom")).unwrap();
        let err = handle.join().unwrap_err();
        assert!(matches!(err, TxsealError::Worker(_)));
    }
}
