//! Storage layer for txseal
//!
//! The export and import pipelines only see a `RecordStore`: read every
//! record newest first, queue inserts, and commit them as one unit.
//! `JsonRecordStore` keeps records in a JSON file with atomic writes;
//! `MemoryRecordStore` keeps them in memory.

pub mod blob_file;
pub mod file_io;
pub mod memory;
pub mod records;

pub use blob_file::{read_blob, write_blob, AccessMode, ScopedFileAccess};
pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use memory::MemoryRecordStore;
pub use records::JsonRecordStore;

use crate::error::TxsealResult;
use crate::models::Record;

/// Persistent collection of records
///
/// Methods take `&self`; implementations synchronize internally so a store
/// can be shared with a worker thread behind an `Arc`.
pub trait RecordStore: Send + Sync {
    /// Every committed record, sorted by date with the newest first
    fn fetch_all_newest_first(&self) -> TxsealResult<Vec<Record>>;

    /// Queue a record for the next commit
    fn insert(&self, record: Record) -> TxsealResult<()>;

    /// Persist all queued records as a single unit
    ///
    /// On failure the committed set is unchanged and the queue is kept.
    fn commit(&self) -> TxsealResult<()>;

    /// Drop all queued records without persisting them
    fn discard_pending(&self) -> TxsealResult<()>;

    /// Number of committed records
    fn count(&self) -> TxsealResult<usize>;
}
