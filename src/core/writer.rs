//! Secret writer.
//!
//! Turns a set of secrets into store writes:
//!
//! - auto-derived secrets are always written;
//! - manual secrets are written only if the store does not have them yet;
//! - empty values are never written.
//!
//! The store has no notion of provenance, so the manual rule is enforced here
//! by listing the store before the batch and dropping manual names it already
//! holds. Writes are sequential; the first failure aborts the rest and nothing
//! already written is rolled back.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::core::cipher::{Cipher, SealedBox};
use crate::core::domain::{PublishReport, Secret};
use crate::core::store::SecretStore;
use crate::core::types::SecretName;
use crate::error::{Error, Result};

/// The secrets a publish will write, and why the others are left out.
#[derive(Debug, Default)]
pub struct WritePlan {
    /// Secrets to write, in order
    pub writes: Vec<Secret>,
    /// Manual secrets the store already has
    pub preserved: Vec<SecretName>,
    /// Manual secrets missing from the store with no local value
    pub unresolved: Vec<SecretName>,
    /// Secrets with an empty value
    pub skipped_empty: Vec<SecretName>,
}

impl WritePlan {
    /// Build a plan against the names currently in the store.
    ///
    /// # Arguments
    ///
    /// * `secrets` - Candidate secrets; a later entry replaces an earlier one with the same name
    /// * `manual` - Every configured manual name, with or without a local value
    /// * `existing` - Names present in the store
    pub fn build(secrets: Vec<Secret>, manual: &[SecretName], existing: &BTreeSet<String>) -> Self {
        let mut plan = Self::default();
        let mut candidates: Vec<Secret> = Vec::with_capacity(secrets.len());
        for secret in secrets {
            candidates.retain(|s| s.name() != secret.name());
            candidates.push(secret);
        }

        for secret in candidates {
            if secret.is_manual() && existing.contains(secret.name()) {
                debug!(name = secret.name(), "manual secret exists, preserving");
                plan.preserved.push(secret.name().to_string());
            } else if secret.value().is_empty() {
                warn!(name = secret.name(), "skipping empty value");
                plan.skipped_empty.push(secret.name().to_string());
            } else {
                plan.writes.push(secret);
            }
        }

        for name in manual {
            let accounted = plan.writes.iter().any(|s| s.name() == name)
                || plan.preserved.contains(name)
                || plan.skipped_empty.contains(name);
            if accounted {
                continue;
            }
            if existing.contains(name) {
                plan.preserved.push(name.clone());
            } else {
                warn!(name = %name, "manual secret missing from store and no value provided");
                plan.unresolved.push(name.clone());
            }
        }

        plan
    }

    /// Names that will be written.
    pub fn names(&self) -> Vec<&str> {
        self.writes.iter().map(Secret::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// List the store and build a plan against it.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be listed.
pub fn plan(
    store: &mut dyn SecretStore,
    secrets: Vec<Secret>,
    manual: &[SecretName],
) -> Result<WritePlan> {
    let existing: BTreeSet<String> = store.list()?.into_iter().collect();
    debug!(existing = existing.len(), "store listed");
    Ok(WritePlan::build(secrets, manual, &existing))
}

/// Seal and write every secret in the plan.
///
/// # Errors
///
/// Returns the store or cipher error when nothing was written yet, or
/// `Error::PartialWrite` wrapping it when earlier writes succeeded.
pub fn publish(store: &mut dyn SecretStore, plan: WritePlan) -> Result<PublishReport> {
    let mut report = PublishReport {
        written: Vec::with_capacity(plan.writes.len()),
        preserved: plan.preserved,
        unresolved: plan.unresolved,
        skipped_empty: plan.skipped_empty,
    };
    if plan.writes.is_empty() {
        info!("nothing to write");
        return Ok(report);
    }

    let total = plan.writes.len();
    let key = store.public_key()?;
    debug!(cipher = SealedBox.name(), key_id = key.key_id(), total, "sealing batch");

    for secret in &plan.writes {
        let result = SealedBox
            .encrypt(secret.value(), &key)
            .and_then(|sealed| store.put(secret.name(), &sealed, key.key_id()));

        if let Err(source) = result {
            if report.written.is_empty() {
                return Err(source);
            }
            warn!(
                written = report.written.len(),
                total,
                failed = secret.name(),
                "batch aborted after partial write"
            );
            return Err(Error::PartialWrite {
                written: report.written,
                total,
                source: Box::new(source),
            });
        }

        debug!(name = secret.name(), provenance = secret.provenance().label(), "written");
        report.written.push(secret.name().to_string());
    }

    info!(written = report.written.len(), "publish complete");
    Ok(report)
}

/// [`plan`] followed by [`publish`].
///
/// # Errors
///
/// See [`plan`] and [`publish`].
pub fn write_all(
    store: &mut dyn SecretStore,
    secrets: Vec<Secret>,
    manual: &[SecretName],
) -> Result<PublishReport> {
    let plan = plan(store, secrets, manual)?;
    publish(store, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::error::{ErrorKind, StoreError};

    fn auto_batch() -> Vec<Secret> {
        vec![
            Secret::auto("POSTGRESQL_SERVER", "db.example.com"),
            Secret::auto("AZURE_STORAGE_ACCOUNT", "stacct123"),
            Secret::auto("POSTGRESQL_USER", "admin"),
        ]
    }

    #[test]
    fn test_auto_derived_always_written() {
        let mut store = MemoryStore::new().with_secret("POSTGRESQL_SERVER", "stale.example.com");

        let report = write_all(&mut store, auto_batch(), &[]).unwrap();

        assert_eq!(report.written.len(), 3);
        assert_eq!(store.get("POSTGRESQL_SERVER"), Some("db.example.com"));
    }

    #[test]
    fn test_existing_manual_never_in_batch() {
        let mut store = MemoryStore::new().with_secret("ADMIN_PAT", "ghp_original");
        let mut secrets = auto_batch();
        secrets.push(Secret::manual("ADMIN_PAT", "ghp_replacement"));

        let plan = plan(&mut store, secrets, &["ADMIN_PAT".to_string()]).unwrap();
        assert!(!plan.names().contains(&"ADMIN_PAT"));
        assert_eq!(plan.preserved, vec!["ADMIN_PAT".to_string()]);

        publish(&mut store, plan).unwrap();
        assert_eq!(store.get("ADMIN_PAT"), Some("ghp_original"));
        assert!(!store.writes().iter().any(|w| w == "ADMIN_PAT"));
    }

    #[test]
    fn test_absent_manual_is_created() {
        let mut store = MemoryStore::new();
        let secrets = vec![Secret::manual("POSTGRESQL_PASSWORD", "hunter2")];

        let report = write_all(&mut store, secrets, &["POSTGRESQL_PASSWORD".to_string()]).unwrap();

        assert_eq!(report.written, vec!["POSTGRESQL_PASSWORD".to_string()]);
        assert_eq!(store.get("POSTGRESQL_PASSWORD"), Some("hunter2"));
    }

    #[test]
    fn test_absent_manual_without_value_is_unresolved() {
        let mut store = MemoryStore::new();

        let report = write_all(&mut store, auto_batch(), &["ADMIN_PAT".to_string()]).unwrap();

        assert_eq!(report.unresolved, vec!["ADMIN_PAT".to_string()]);
        assert!(store.get("ADMIN_PAT").is_none());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut store = MemoryStore::new().with_secret("ADMIN_PAT", "ghp_x");
        let manual = ["ADMIN_PAT".to_string()];

        write_all(&mut store, auto_batch(), &manual).unwrap();
        let first = store.snapshot();
        write_all(&mut store, auto_batch(), &manual).unwrap();

        assert_eq!(store.snapshot(), first);
    }

    #[test]
    fn test_empty_values_skipped() {
        let mut store = MemoryStore::new();
        let secrets = vec![Secret::auto("A", ""), Secret::auto("B", "b")];

        let report = write_all(&mut store, secrets, &[]).unwrap();

        assert_eq!(report.skipped_empty, vec!["A".to_string()]);
        assert_eq!(report.written, vec!["B".to_string()]);
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let plan = WritePlan::build(
            vec![Secret::auto("A", "1"), Secret::auto("A", "2")],
            &[],
            &BTreeSet::new(),
        );
        assert_eq!(plan.writes.len(), 1);
        assert_eq!(plan.writes[0].value(), "2");
    }

    #[test]
    fn test_failure_mid_batch_is_partial_write() {
        let mut store = MemoryStore::new().fail_on("AZURE_STORAGE_ACCOUNT");

        let err = write_all(&mut store, auto_batch(), &[]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PartialWrite);
        match err {
            Error::PartialWrite { written, total, .. } => {
                assert_eq!(written, vec!["POSTGRESQL_SERVER".to_string()]);
                assert_eq!(total, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.get("POSTGRESQL_SERVER"), Some("db.example.com"));
        assert!(store.get("POSTGRESQL_USER").is_none());
    }

    #[test]
    fn test_failure_on_first_write_is_not_partial() {
        let mut store = MemoryStore::new().fail_on("POSTGRESQL_SERVER");

        let err = write_all(&mut store, auto_batch(), &[]).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Request(_))));
    }

    #[test]
    fn test_auth_failure_aborts_before_writes() {
        let mut store = MemoryStore::new().deny_all();

        let err = write_all(&mut store, auto_batch(), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthFailure);
    }
}
