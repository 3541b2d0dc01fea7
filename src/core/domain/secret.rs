//! Secret type.
//!
//! A plaintext secret bound for the store, tagged with where its value came from.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::core::types::SecretName;

/// Where a secret's value originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Supplied by an operator. Created when absent, never overwritten.
    Manual,
    /// Computed from parameters, deployment outputs, constants or certificate
    /// files. Overwritten on every run.
    AutoDerived,
}

impl Provenance {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Manual => "manual",
            Provenance::AutoDerived => "auto",
        }
    }
}

/// A named plaintext value with provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    name: SecretName,
    value: Zeroizing<String>,
    provenance: Provenance,
}

impl Secret {
    /// Create a secret.
    pub fn new(
        name: impl Into<SecretName>,
        value: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            name: name.into(),
            value: Zeroizing::new(value.into()),
            provenance,
        }
    }

    /// Shorthand for an auto-derived secret.
    pub fn auto(name: impl Into<SecretName>, value: impl Into<String>) -> Self {
        Self::new(name, value, Provenance::AutoDerived)
    }

    /// Shorthand for a manual secret.
    pub fn manual(name: impl Into<SecretName>, value: impl Into<String>) -> Self {
        Self::new(name, value, Provenance::Manual)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plaintext value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_manual(&self) -> bool {
        self.provenance == Provenance::Manual
    }

    /// First 12 hex chars of the value's SHA-256, safe to print.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(self.value.as_bytes());
        hash.iter()
            .take(6)
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("provenance", &self.provenance)
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
