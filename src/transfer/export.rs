//! Sealed export
//!
//! Reads every record from the store (newest first), encodes them, and seals
//! the payload under a key derived from the passphrase. Nothing in the store
//! changes.

use std::path::Path;

use crate::crypto::{derive_key, seal, SealedBlob, SecureString};
use crate::error::TxsealResult;
use crate::storage::{write_blob, RecordStore};

use super::codec;

/// Summary of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of records in the file
    pub record_count: usize,
    /// Size of the sealed blob in bytes
    pub blob_size: usize,
}

/// Export all records into one sealed blob
pub fn export_records(store: &dyn RecordStore, passphrase: &SecureString) -> TxsealResult<SealedBlob> {
    export_with_count(store, passphrase).map(|(blob, _)| blob)
}

fn export_with_count(
    store: &dyn RecordStore,
    passphrase: &SecureString,
) -> TxsealResult<(SealedBlob, usize)> {
    // The store owns the ordering contract; no re-sort here
    let records = store.fetch_all_newest_first()?;
    let plaintext = codec::encode(&records)?;

    let key = derive_key(passphrase);
    let blob = seal(&plaintext, &key)?;

    tracing::info!(
        records = records.len(),
        bytes = blob.len(),
        "sealed export payload"
    );
    Ok((blob, records.len()))
}

/// Export all records and write the sealed blob to a file
///
/// The file is only created once sealing has succeeded.
pub fn export_to_file(
    store: &dyn RecordStore,
    passphrase: &SecureString,
    path: &Path,
) -> TxsealResult<ExportSummary> {
    let (blob, record_count) = export_with_count(store, passphrase)?;
    write_blob(path, blob.as_bytes())?;

    tracing::info!(path = %path.display(), records = record_count, "export written");
    Ok(ExportSummary {
        record_count,
        blob_size: blob.len(),
    })
}
