//! Client-side encryption for the secret store.
//!
//! The store never receives plaintext. Each value is sealed to the
//! repository's public key before upload.
//!
//! ## Backends
//!
//! - **sealed box**: libsodium `crypto_box_seal` (X25519 + XSalsa20-Poly1305),
//!   the format GitHub Actions expects.

use crate::core::types::SealedValue;
use crate::error::Result;

mod sealed;

pub use sealed::{open, SealedBox, StoreKey};

/// Encryption backend trait.
///
/// Recipients are backend-specific; for sealed boxes it is the store's
/// public key.
pub trait Cipher {
    /// Type representing the recipient public key.
    type Recipient;

    /// Encrypt plaintext for a recipient.
    ///
    /// # Returns
    ///
    /// Base64-encoded ciphertext ready for transport.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn encrypt(&self, plaintext: &str, recipient: &Self::Recipient) -> Result<SealedValue>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}
