//! Sealed-box backend implementation.
//!
//! Anonymous public-key encryption compatible with libsodium's
//! `crypto_box_seal`: an ephemeral X25519 key is generated per message, so the
//! sender needs only the recipient's public key.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey};
use tracing::trace;

use super::Cipher;
use crate::error::{CipherError, Result};

/// A store public key with the identifier the store uses to refer to it.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreKey {
    key_id: String,
    key: PublicKey,
}

impl StoreKey {
    /// Parse a base64-encoded 32-byte X25519 public key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` for bad base64 or a wrong length.
    pub fn from_base64(key_id: impl Into<String>, key: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(key.trim())
            .map_err(|e| CipherError::InvalidPublicKey(format!("invalid base64: {}", e)))?;
        let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            CipherError::InvalidPublicKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;

        Ok(Self {
            key_id: key_id.into(),
            key: PublicKey::from(bytes),
        })
    }

    pub fn from_public(key_id: impl Into<String>, key: PublicKey) -> Self {
        Self {
            key_id: key_id.into(),
            key,
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.key
    }

    /// Base64 form, as the store publishes it.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.key.as_bytes())
    }
}

impl std::fmt::Debug for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreKey")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Sealed-box cipher.
pub struct SealedBox;

impl Cipher for SealedBox {
    type Recipient = StoreKey;

    fn name(&self) -> &'static str {
        "sealed-box"
    }

    fn encrypt(&self, plaintext: &str, recipient: &StoreKey) -> Result<String> {
        trace!(
            key_id = recipient.key_id(),
            plaintext_len = plaintext.len(),
            "sealing"
        );

        let sealed = recipient
            .key
            .seal(&mut OsRng, plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = sealed.len(), "sealed");
        Ok(STANDARD.encode(sealed))
    }
}

/// Open a base64 sealed box with the matching secret key.
///
/// The pipeline never needs this; the in-memory store uses it to hold
/// plaintext the way the remote store would after decrypting.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` for bad base64 or a key mismatch.
pub fn open(sealed: &str, secret: &SecretKey) -> Result<String> {
    let bytes = STANDARD
        .decode(sealed)
        .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;
    let plaintext = secret
        .unseal(&bytes)
        .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

    String::from_utf8(plaintext)
        .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)).into())
}
