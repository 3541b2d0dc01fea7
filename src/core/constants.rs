//! Constants used throughout secret-relay.
//!
//! Centralizes file names, default paths and the container environment contract.

/// Configuration file name (.secret-relay.toml).
pub const CONFIG_FILE: &str = ".secret-relay.toml";

/// Default deployment name queried before falling back to the latest success.
pub const DEFAULT_DEPLOYMENT_NAME: &str = "main";

/// Default parameter file, relative to the project root.
pub const DEFAULT_PARAMS_FILE: &str = "infra/main.bicepparam";

/// Default certificate directory, relative to the project root.
pub const DEFAULT_CERT_DIR: &str = "secrets/certs";

/// Default operator env file consumed by `push-env`.
pub const DEFAULT_ENV_FILE: &str = "secrets/set_env.sh";

/// Certificate file name inside the certificate directory.
pub const CERT_FILE: &str = "letsencrypt-server.crt";

/// Private key file name inside the certificate directory.
pub const KEY_FILE: &str = "letsencrypt-server.key";

/// Secret holding the PEM certificate.
pub const CERT_SECRET: &str = "LETSENCRYPT_CERT";

/// Secret holding the PEM private key.
pub const KEY_SECRET: &str = "LETSENCRYPT_KEY";

/// GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub REST API version header value.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Environment variables the container requires at deploy time.
pub const REQUIRED_RUNTIME_VARS: &[&str] = &[
    "POSTGRESQL_SERVER",
    "POSTGRESQL_USER",
    "POSTGRESQL_PASSWORD",
    "AZURE_STORAGE_ACCOUNT",
    "AZURE_STORAGE_CONTAINER",
];

/// Port variable and its default.
pub const PORT_VAR: &str = "POSTGRESQL_PORT";
pub const DEFAULT_PORT: &str = "5432";

/// Optional telemetry token variable.
pub const TELEMETRY_VAR: &str = "TELEMETRY_TOKEN";
