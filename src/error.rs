//! Error types.
//!
//! Each pipeline component has its own error enum; [`Error`] wraps them all so
//! callers can propagate with `?` and still classify failures by [`ErrorKind`].

use thiserror::Error;

/// Coarse classification surfaced to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A deployment, output, parameter or file that should exist does not.
    NotFound,
    /// The token is invalid, expired or lacks permission.
    AuthFailure,
    /// Text content does not match the expected contract.
    FormatMismatch,
    /// Some secrets were published before a later failure.
    PartialWrite,
    /// Local filesystem failure.
    Io,
    /// Anything else (network, tooling, encryption).
    Other,
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("not initialized: run `secret-relay init` first")]
    NotInitialized,

    #[error("already initialized: .secret-relay.toml exists")]
    AlreadyInitialized,

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("missing config field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("invalid secret name '{name}': {reason}")]
    InvalidSecretName { name: String, reason: String },

    #[error("secret '{0}' is declared both manual and auto-derived")]
    ProvenanceConflict(String),

    #[error("secret '{0}' is derived from more than one source")]
    DuplicateSecret(String),

    #[error("could not determine repository: set GITHUB_REPOSITORY or `repository` in config")]
    UnknownRepository,

    #[error("GitHub token not provided: set GITHUB_API_TOKEN/GITHUB_TOKEN or use --token")]
    MissingToken,

    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingRuntimeVars(Vec<String>),
}

/// Parameter file errors.
#[derive(Error, Debug)]
pub enum ParamError {
    #[error("parameter file not found: {0}")]
    FileNotFound(String),

    #[error("parameter '{name}' not found in {path}")]
    ParameterNotFound { name: String, path: String },

    #[error("failed to read parameter file: {0}")]
    Read(#[from] std::io::Error),
}

/// Deployment output extraction errors.
#[derive(Error, Debug)]
pub enum DeploymentError {
    #[error("no successful deployment found in resource group '{resource_group}' (looked for '{name}')")]
    DeploymentNotFound { resource_group: String, name: String },

    #[error("deployment output '{0}' is missing")]
    OutputMissing(String),

    #[error("failed to extract deployment outputs: {0}")]
    ExtractionFailed(String),
}

/// Remote secret store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("authentication failed: {0}")]
    AuthFailure(String),

    #[error("repository '{0}' not found or not accessible")]
    RepositoryNotFound(String),

    #[error("secret store request failed: {0}")]
    Request(String),

    #[error("unexpected response from secret store: {0}")]
    InvalidResponse(String),
}

/// Certificate set errors.
#[derive(Error, Debug)]
pub enum CertError {
    #[error("invalid certificate format in {file}: {reason}")]
    InvalidCertificateFormat { file: String, reason: String },

    #[error("failed to read certificate file: {0}")]
    Read(#[from] std::io::Error),
}

/// Client-side encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid repository public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cert(#[from] CertError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("{source} (after writing {} of {total} secrets: {})", written.len(), written.join(", "))]
    PartialWrite {
        written: Vec<String>,
        total: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Classify this error for operator-facing reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(ConfigError::NotInitialized) => ErrorKind::NotFound,
            Error::Config(ConfigError::MissingToken) => ErrorKind::AuthFailure,
            Error::Config(ConfigError::ReadFile(_)) => ErrorKind::Io,
            Error::Config(ConfigError::MissingRuntimeVars(_)) => ErrorKind::NotFound,
            Error::Config(_) => ErrorKind::FormatMismatch,
            Error::Param(ParamError::Read(_)) => ErrorKind::Io,
            Error::Param(_) => ErrorKind::NotFound,
            Error::Deployment(DeploymentError::ExtractionFailed(_)) => ErrorKind::Other,
            Error::Deployment(_) => ErrorKind::NotFound,
            Error::Store(StoreError::AuthFailure(_)) => ErrorKind::AuthFailure,
            Error::Store(StoreError::RepositoryNotFound(_)) => ErrorKind::NotFound,
            Error::Store(_) => ErrorKind::Other,
            Error::Cert(CertError::InvalidCertificateFormat { .. }) => ErrorKind::FormatMismatch,
            Error::Cert(CertError::Read(_)) => ErrorKind::Io,
            Error::Cipher(CipherError::InvalidPublicKey(_)) => ErrorKind::FormatMismatch,
            Error::Cipher(_) => ErrorKind::Other,
            Error::PartialWrite { .. } => ErrorKind::PartialWrite,
            Error::Io(_) | Error::Prompt(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err: Error = DeploymentError::OutputMissing("x".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: Error = StoreError::AuthFailure("401".into()).into();
        assert_eq!(err.kind(), ErrorKind::AuthFailure);

        let err: Error = CertError::InvalidCertificateFormat {
            file: "a.crt".into(),
            reason: "no header".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::FormatMismatch);
    }

    #[test]
    fn test_partial_write_message_lists_written() {
        let err = Error::PartialWrite {
            written: vec!["A".into(), "B".into()],
            total: 3,
            source: Box::new(StoreError::Request("boom".into()).into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("2 of 3"));
        assert!(msg.contains("A, B"));
        assert_eq!(err.kind(), ErrorKind::PartialWrite);
    }
}
