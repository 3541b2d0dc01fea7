//! Outcome of a publish run.

use crate::core::types::SecretName;

/// Pipeline stage reached by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    ParamsLoaded,
    OutputsExtracted,
    SecretsMerged,
    Published,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stage::ParamsLoaded => "params loaded",
            Stage::OutputsExtracted => "outputs extracted",
            Stage::SecretsMerged => "secrets merged",
            Stage::Published => "published",
        };
        f.write_str(label)
    }
}

/// Result of a publish operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Secrets written to the store, in write order
    pub written: Vec<SecretName>,
    /// Manual secrets left alone because the store already had them
    pub preserved: Vec<SecretName>,
    /// Manual secrets absent from the store with no value available locally
    pub unresolved: Vec<SecretName>,
    /// Secrets dropped for having an empty value
    pub skipped_empty: Vec<SecretName>,
}
