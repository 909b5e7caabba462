//! Sealed import
//!
//! Opens a sealed blob, decodes the records, and merges them into the store.
//! Authentication and decoding both finish before the first insert, so a
//! wrong passphrase, a damaged file, or a bad payload never reaches the store.

use std::path::Path;

use crate::crypto::{derive_key, open, SecureString};
use crate::error::TxsealResult;
use crate::storage::{read_blob, RecordStore};

use super::codec;

/// Import records from a sealed blob
///
/// Returns the number of records imported. Records are inserted in file
/// order and committed once; if any insert or the commit fails, queued
/// inserts are discarded and the error is returned.
pub fn import_records(
    blob: &[u8],
    passphrase: &SecureString,
    store: &dyn RecordStore,
) -> TxsealResult<usize> {
    let key = derive_key(passphrase);
    let plaintext = open(blob, &key)?;
    drop(key);

    let records = codec::decode(&plaintext)?;
    let count = records.len();

    if let Err(e) = insert_and_commit(store, records) {
        tracing::warn!(error = %e, "import aborted, discarding queued records");
        store.discard_pending()?;
        return Err(e);
    }

    tracing::info!(records = count, "import committed");
    Ok(count)
}

fn insert_and_commit(
    store: &dyn RecordStore,
    records: Vec<crate::models::Record>,
) -> TxsealResult<()> {
    for record in records {
        store.insert(record)?;
    }
    store.commit()
}

/// Read a sealed file and import its records
pub fn import_from_file(
    path: &Path,
    passphrase: &SecureString,
    store: &dyn RecordStore,
) -> TxsealResult<usize> {
    let blob = read_blob(path)?;
    import_records(&blob, passphrase, store)
}
