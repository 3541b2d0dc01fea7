//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret name (e.g., POSTGRESQL_SERVER, ADMIN_PAT).
///
/// Must be a valid environment variable name.
pub type SecretName = String;

/// A deployment output name as emitted by the template (e.g., postgresServerFqdn).
pub type OutputName = String;

/// A template parameter name (e.g., postgresAdminUsername).
pub type ParamName = String;

/// A sealed, base64-encoded secret value ready for upload.
pub type SealedValue = String;
