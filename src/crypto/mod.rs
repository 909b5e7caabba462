//! Cryptographic functions for txseal
//!
//! Provides SHA-256 key derivation from a passphrase and AES-256-GCM sealing
//! of export payloads.

pub mod key_derivation;
pub mod sealed_blob;
pub mod secure_memory;

pub use key_derivation::{derive_key, DerivedKey, KEY_LENGTH};
pub use sealed_blob::{open, seal, SealedBlob, MIN_BLOB_SIZE, NONCE_SIZE, TAG_SIZE};
pub use secure_memory::SecureString;
