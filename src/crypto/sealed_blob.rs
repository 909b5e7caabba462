//! AES-256-GCM sealing of arbitrary bytes
//!
//! A sealed blob is `nonce ∥ ciphertext ∥ tag` with no header and no length
//! fields. The ciphertext length is whatever remains after the fixed-size
//! nonce and tag. Every seal draws a fresh random nonce.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{AuthFailure, TxsealError, TxsealResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Smallest structurally valid blob (empty plaintext)
pub const MIN_BLOB_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// A sealed payload, ready to be written to a file as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    bytes: Vec<u8>,
}

impl SealedBlob {
    /// Wrap raw bytes read from a file
    ///
    /// Fails if the bytes are too short to hold a nonce and tag.
    pub fn from_bytes(bytes: Vec<u8>) -> TxsealResult<Self> {
        if bytes.len() < MIN_BLOB_SIZE {
            return Err(TxsealError::Authentication(AuthFailure::Truncated {
                len: bytes.len(),
            }));
        }
        Ok(Self { bytes })
    }

    /// The nonce region
    pub fn nonce(&self) -> &[u8] {
        &self.bytes[..NONCE_SIZE]
    }

    /// The ciphertext region (same length as the plaintext)
    pub fn ciphertext(&self) -> &[u8] {
        &self.bytes[NONCE_SIZE..self.bytes.len() - TAG_SIZE]
    }

    /// The authentication tag region
    pub fn tag(&self) -> &[u8] {
        &self.bytes[self.bytes.len() - TAG_SIZE..]
    }

    /// Total size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a blob holds at least a nonce and a tag
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the full byte sequence
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the full byte sequence
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for SealedBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

fn cipher_for(key: &DerivedKey) -> TxsealResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| TxsealError::KeyDerivation(format!("Failed to create cipher: {}", e)))
}

/// Seal plaintext under a derived key
pub fn seal(plaintext: &[u8], key: &DerivedKey) -> TxsealResult<SealedBlob> {
    let cipher = cipher_for(key)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // aes-gcm appends the tag to the ciphertext
    let ciphertext_and_tag = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| TxsealError::Encode(format!("Encryption failed: {}", e)))?;

    let mut bytes = Vec::with_capacity(NONCE_SIZE + ciphertext_and_tag.len());
    bytes.extend_from_slice(&nonce_bytes);
    bytes.extend_from_slice(&ciphertext_and_tag);

    Ok(SealedBlob { bytes })
}

/// Open a sealed blob
///
/// Structural checks run before any decryption. A wrong key and an altered
/// blob both fail with the same authentication error, and no plaintext is
/// returned on failure.
pub fn open(blob: &[u8], key: &DerivedKey) -> TxsealResult<Vec<u8>> {
    if blob.len() < MIN_BLOB_SIZE {
        tracing::debug!(len = blob.len(), "sealed blob too short");
        return Err(TxsealError::Authentication(AuthFailure::Truncated {
            len: blob.len(),
        }));
    }

    let cipher = cipher_for(key)?;
    let (nonce_bytes, ciphertext_and_tag) = blob.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher.decrypt(nonce, ciphertext_and_tag).map_err(|_| {
        tracing::debug!(len = blob.len(), "sealed blob tag mismatch");
        TxsealError::Authentication(AuthFailure::TagMismatch)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::derive_key;

    fn test_key() -> DerivedKey {
        derive_key("test_passphrase")
    }

    #[test]
    fn test_seal_open() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let blob = seal(plaintext, &key).unwrap();
        let opened = open(blob.as_bytes(), &key).unwrap();

        assert_eq!(plaintext, opened.as_slice());
    }

    #[test]
    fn test_blob_layout() {
        let key = test_key();
        let plaintext = b"0123456789";

        let blob = seal(plaintext, &key).unwrap();

        assert_eq!(blob.len(), NONCE_SIZE + plaintext.len() + TAG_SIZE);
        assert_eq!(blob.nonce().len(), NONCE_SIZE);
        assert_eq!(blob.ciphertext().len(), plaintext.len());
        assert_eq!(blob.tag().len(), TAG_SIZE);
        assert_ne!(blob.ciphertext(), plaintext);
    }

    #[test]
    fn test_different_nonces() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let blob1 = seal(plaintext, &key).unwrap();
        let blob2 = seal(plaintext, &key).unwrap();

        assert_ne!(blob1.nonce(), blob2.nonce());
        assert_ne!(blob1, blob2);
    }

    #[test]
    fn test_wrong_key_fails() {
        let blob = seal(b"Hello, World!", &derive_key("p1")).unwrap();

        let err = open(blob.as_bytes(), &derive_key("p2")).unwrap_err();
        assert!(matches!(
            err,
            TxsealError::Authentication(AuthFailure::TagMismatch)
        ));
    }

    #[test]
    fn test_every_bit_flip_detected() {
        let key = test_key();
        let blob = seal(b"tamper me", &key).unwrap().into_bytes();

        for byte in 0..blob.len() {
            for bit in 0..8 {
                let mut tampered = blob.clone();
                tampered[byte] ^= 1 << bit;
                let err = open(&tampered, &key).unwrap_err();
                assert!(err.is_authentication(), "byte {} bit {}", byte, bit);
            }
        }
    }

    #[test]
    fn test_truncated_blob_fails_structurally() {
        let key = test_key();
        let blob = seal(b"some payload", &key).unwrap();

        let err = open(&blob.as_bytes()[..5], &key).unwrap_err();
        assert!(matches!(
            err,
            TxsealError::Authentication(AuthFailure::Truncated { len: 5 })
        ));

        let err = open(&blob.as_bytes()[..MIN_BLOB_SIZE - 1], &key).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_from_bytes_checks_length() {
        assert!(SealedBlob::from_bytes(vec![0u8; MIN_BLOB_SIZE - 1]).is_err());

        let blob = SealedBlob::from_bytes(vec![0u8; MIN_BLOB_SIZE]).unwrap();
        assert!(blob.ciphertext().is_empty());
        assert!(!blob.is_empty());
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();

        let blob = seal(b"", &key).unwrap();
        assert_eq!(blob.len(), MIN_BLOB_SIZE);

        let opened = open(blob.as_bytes(), &key).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn test_large_plaintext() {
        let key = test_key();
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let blob = seal(&plaintext, &key).unwrap();
        let opened = open(blob.as_bytes(), &key).unwrap();

        assert_eq!(plaintext, opened);
    }
}
