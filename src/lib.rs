//! txseal - passphrase-sealed transfer of transaction records
//!
//! This library moves a list of income and expense records between
//! installations as one encrypted file. A passphrase is hashed into an
//! AES-256 key, the records are encoded as JSON, and the payload is sealed
//! with AES-256-GCM as `nonce || ciphertext || tag`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The transaction record and its category
//! - `crypto`: Key derivation and authenticated sealing
//! - `storage`: Record stores and sealed file access
//! - `transfer`: Record codec plus the export and import pipelines
//! - `audit`: Audit log of export/import outcomes
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use txseal::crypto::SecureString;
//! use txseal::storage::MemoryRecordStore;
//! use txseal::transfer::{export_records, import_records};
//!
//! let source = MemoryRecordStore::new();
//! let passphrase = SecureString::from("correct horse");
//! let blob = export_records(&source, &passphrase)?;
//!
//! let target = MemoryRecordStore::new();
//! import_records(blob.as_bytes(), &passphrase, &target)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;
pub mod transfer;

pub use error::{TxsealError, TxsealResult};
