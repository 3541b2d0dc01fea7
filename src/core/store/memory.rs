//! In-memory secret store.
//!
//! Behaves like the remote store: it publishes a public key, accepts sealed
//! values and keeps the opened plaintext so tests can inspect final state.

use std::collections::BTreeMap;

use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use zeroize::Zeroizing;

use super::SecretStore;
use crate::core::cipher::{self, StoreKey};
use crate::error::{Result, StoreError};

const KEY_ID: &str = "memory-key";

/// Secret store held in process memory.
pub struct MemoryStore {
    secret_key: SecretKey,
    secrets: BTreeMap<String, Zeroizing<String>>,
    writes: Vec<String>,
    fail_on: Option<String>,
    deny_all: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            secret_key: SecretKey::generate(&mut OsRng),
            secrets: BTreeMap::new(),
            writes: Vec::new(),
            fail_on: None,
            deny_all: false,
        }
    }

    /// Seed a plaintext secret without counting it as a write.
    pub fn with_secret(mut self, name: &str, value: &str) -> Self {
        self.secrets
            .insert(name.to_string(), Zeroizing::new(value.to_string()));
        self
    }

    /// Make `put` fail for `name`, simulating a mid-batch outage.
    pub fn fail_on(mut self, name: &str) -> Self {
        self.fail_on = Some(name.to_string());
        self
    }

    /// Reject every call as unauthorized.
    pub fn deny_all(mut self) -> Self {
        self.deny_all = true;
        self
    }

    /// Plaintext currently stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.secrets.get(name).map(|v| v.as_str())
    }

    /// Snapshot of all stored plaintext values.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.secrets
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Names written through `put`, in order, including overwrites.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    fn check_auth(&self) -> Result<()> {
        if self.deny_all {
            return Err(StoreError::AuthFailure("invalid or expired token".into()).into());
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for MemoryStore {
    fn public_key(&mut self) -> Result<StoreKey> {
        self.check_auth()?;
        Ok(StoreKey::from_public(KEY_ID, self.secret_key.public_key()))
    }

    fn list(&mut self) -> Result<Vec<String>> {
        self.check_auth()?;
        Ok(self.secrets.keys().cloned().collect())
    }

    fn put(&mut self, name: &str, sealed: &str, key_id: &str) -> Result<()> {
        self.check_auth()?;
        if self.fail_on.as_deref() == Some(name) {
            return Err(StoreError::Request(format!("503 Service Unavailable ({})", name)).into());
        }
        if key_id != KEY_ID {
            return Err(StoreError::Request(format!("422 unknown key_id {}", key_id)).into());
        }

        let plaintext = cipher::open(sealed, &self.secret_key)?;
        self.secrets
            .insert(name.to_string(), Zeroizing::new(plaintext));
        self.writes.push(name.to_string());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.check_auth()?;
        self.secrets.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cipher::{Cipher, SealedBox};

    #[test]
    fn test_put_opens_sealed_value() {
        let mut store = MemoryStore::new();
        let key = store.public_key().unwrap();
        let sealed = SealedBox.encrypt("stacct123", &key).unwrap();

        store.put("AZURE_STORAGE_ACCOUNT", &sealed, key.key_id()).unwrap();

        assert_eq!(store.get("AZURE_STORAGE_ACCOUNT"), Some("stacct123"));
        assert_eq!(store.writes(), ["AZURE_STORAGE_ACCOUNT"]);
    }

    #[test]
    fn test_put_rejects_plaintext() {
        let mut store = MemoryStore::new();
        let key = store.public_key().unwrap();

        assert!(store.put("X", "plaintext", key.key_id()).is_err());
        assert!(store.get("X").is_none());
    }

    #[test]
    fn test_seeded_secrets_are_listed_not_written() {
        let mut store = MemoryStore::new().with_secret("ADMIN_PAT", "ghp_x");

        assert_eq!(store.list().unwrap(), vec!["ADMIN_PAT".to_string()]);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new().with_secret("OLD", "v");
        store.delete("OLD").unwrap();
        store.delete("NEVER_EXISTED").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_deny_all() {
        let mut store = MemoryStore::new().deny_all();
        assert!(store.list().is_err());
        assert!(store.public_key().is_err());
    }
}
