//! Passphrase-protected transfer of records between installations
//!
//! - `codec`: records to and from the JSON payload
//! - `export`: store to sealed blob
//! - `import`: sealed blob to store
//! - `worker`: running either on a background thread
//!
//! # Example
//!
//! ```rust,ignore
//! use txseal::crypto::SecureString;
//! use txseal::storage::MemoryRecordStore;
//! use txseal::transfer::{export_records, import_records};
//!
//! let blob = export_records(&source, &SecureString::new("hunter2"))?;
//! let count = import_records(blob.as_bytes(), &SecureString::new("hunter2"), &target)?;
//! ```

pub mod codec;
pub mod export;
pub mod import;
pub mod worker;

pub use export::{export_records, export_to_file, ExportSummary};
pub use import::{import_from_file, import_records};
pub use worker::{spawn_export, spawn_import, TransferHandle};
