//! Key derivation from a passphrase
//!
//! The export format derives its AES-256 key as the SHA-256 digest of the
//! passphrase's UTF-8 bytes. There is no salt and no stretching, so any
//! implementation that knows the passphrase can open the file. Changing this
//! scheme changes the file format.

use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

/// Length of the derived key in bytes (AES-256)
pub const KEY_LENGTH: usize = 32;

/// A derived encryption key
///
/// Zeroized when dropped. Never logged: `Debug` prints a placeholder.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase
///
/// Total over all inputs, the empty string included.
pub fn derive_key(passphrase: &str) -> DerivedKey {
    let digest = Sha256::digest(passphrase.as_bytes());

    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(&digest);

    DerivedKey { key }
}
