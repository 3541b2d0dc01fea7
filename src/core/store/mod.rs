//! Remote secret store.
//!
//! Abstracts the repository-scoped encrypted key-value service so the
//! pipeline can run against GitHub or an in-memory fake.
//!
//! The store is last-write-wins with no versioning, no locking and no
//! notion of provenance. Keeping manual secrets intact is the writer's job.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `gitlab.rs`)
//! 3. Re-export from this module

use crate::core::cipher::StoreKey;
use crate::error::Result;

mod github;
mod memory;

pub use github::{AccessReport, GitHub};
pub use memory::MemoryStore;

/// Secret store trait.
pub trait SecretStore {
    /// Public key that values must be sealed to before `put`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on auth or transport failure.
    fn public_key(&mut self) -> Result<StoreKey>;

    /// Names of all secrets currently in the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on auth or transport failure.
    fn list(&mut self) -> Result<Vec<String>>;

    /// Create or overwrite a secret with an already sealed value.
    ///
    /// # Arguments
    ///
    /// * `name` - Secret name
    /// * `sealed` - Base64 sealed value
    /// * `key_id` - Identifier of the key the value was sealed to
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on auth or transport failure.
    fn put(&mut self, name: &str, sealed: &str, key_id: &str) -> Result<()>;

    /// Delete a secret. Deleting an absent secret is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on auth or transport failure.
    fn delete(&mut self, name: &str) -> Result<()>;
}
