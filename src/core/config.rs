//! Configuration file management.
//!
//! Handles reading, writing, and validating `.secret-relay.toml`. The config
//! says where each secret comes from; the values themselves stay in the
//! parameter file, the deployment, the certificate directory or the operator's
//! environment.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::Provenance;
use crate::core::types::{OutputName, ParamName, SecretName};
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.secret-relay.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Secrets an operator sets by hand; never overwritten
    #[serde(default)]
    pub manual: Vec<SecretName>,
    /// Metadata about the configuration
    pub relay: Meta,
    /// Which deployment to read outputs from
    pub deployment: DeploymentConfig,
    /// Parameter file and the secrets derived from it
    #[serde(default)]
    pub params: ParamsConfig,
    /// Secret name -> deployment output name
    #[serde(default)]
    pub outputs: BTreeMap<SecretName, OutputName>,
    /// Secret name -> fixed value
    #[serde(default)]
    pub constants: BTreeMap<SecretName, String>,
    /// Optional certificate directory
    #[serde(default)]
    pub certs: CertsConfig,
}

/// Metadata section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    /// Configuration version
    pub version: String,
    /// Target repository as `owner/name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// Deployment lookup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentConfig {
    pub resource_group: String,
    #[serde(default = "default_deployment_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// Parameter file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamsConfig {
    #[serde(default = "default_params_file")]
    pub file: PathBuf,
    /// Secret name -> parameter name
    #[serde(default)]
    pub secrets: BTreeMap<SecretName, ParamName>,
}

/// Certificate directory settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertsConfig {
    #[serde(default = "default_cert_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_deployment_name() -> String {
    constants::DEFAULT_DEPLOYMENT_NAME.to_string()
}

fn default_params_file() -> PathBuf {
    PathBuf::from(constants::DEFAULT_PARAMS_FILE)
}

fn default_cert_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_CERT_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            file: default_params_file(),
            secrets: BTreeMap::new(),
        }
    }
}

impl Default for CertsConfig {
    fn default() -> Self {
        Self {
            dir: default_cert_dir(),
            enabled: true,
        }
    }
}

impl Config {
    /// Starter configuration for a FlightSQL-on-Azure deployment repository.
    pub fn new(resource_group: &str) -> Self {
        let params = BTreeMap::from([(
            "POSTGRESQL_USER".to_string(),
            "postgresAdminUsername".to_string(),
        )]);
        let outputs = BTreeMap::from([
            (
                "POSTGRESQL_SERVER".to_string(),
                "postgresServerFqdn".to_string(),
            ),
            (
                "AZURE_STORAGE_ACCOUNT".to_string(),
                "storageAccountName".to_string(),
            ),
        ]);

        Self {
            manual: vec!["ADMIN_PAT".to_string(), "POSTGRESQL_PASSWORD".to_string()],
            relay: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                repository: None,
            },
            deployment: DeploymentConfig {
                resource_group: resource_group.to_string(),
                name: default_deployment_name(),
                subscription: None,
            },
            params: ParamsConfig {
                file: default_params_file(),
                secrets: params,
            },
            outputs,
            constants: BTreeMap::new(),
            certs: CertsConfig::default(),
        }
    }

    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists in the current directory
    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    /// Load configuration from `.secret-relay.toml` in the current directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or a validation error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(
            params = config.params.secrets.len(),
            outputs = config.outputs.len(),
            constants = config.constants.len(),
            manual = config.manual.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or a validation error.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `.secret-relay.toml`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self) -> Result<()> {
        debug!("saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(Self::config_path(), contents)?;

        Ok(())
    }

    /// Provenance of a configured secret, if the config mentions it
    pub fn provenance(&self, name: &str) -> Option<Provenance> {
        if self.manual.iter().any(|m| m == name) {
            Some(Provenance::Manual)
        } else if self.auto_derived_names().contains(name) {
            Some(Provenance::AutoDerived)
        } else {
            None
        }
    }

    /// Every secret name the pipeline derives automatically
    pub fn auto_derived_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = self
            .params
            .secrets
            .keys()
            .chain(self.outputs.keys())
            .chain(self.constants.keys())
            .map(String::as_str)
            .collect();
        if self.certs.enabled {
            names.insert(constants::CERT_SECRET);
            names.insert(constants::KEY_SECRET);
        }
        names
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Version field is present and looks like semver
    /// - Resource group is set
    /// - All secret names are valid environment variable names
    /// - No secret is derived from two sources
    /// - No secret is both manual and auto-derived
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.relay.version.is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }
        if self.relay.version.split('.').count() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", self.relay.version),
            }
            .into());
        }

        if self.deployment.resource_group.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "deployment.resource_group",
            }
            .into());
        }

        if let Some(repo) = &self.relay.repository {
            repo.parse::<crate::core::repo::Repository>()?;
        }

        let mut seen = BTreeSet::new();
        let sources = self
            .params
            .secrets
            .keys()
            .chain(self.outputs.keys())
            .chain(self.constants.keys());
        for name in sources {
            validation::validate_name(name)?;
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateSecret(name.clone()).into());
            }
        }
        if self.certs.enabled {
            for name in [constants::CERT_SECRET, constants::KEY_SECRET] {
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateSecret(name.to_string()).into());
                }
            }
        }

        for name in &self.manual {
            validation::validate_name(name)?;
            if seen.contains(name.as_str()) {
                return Err(ConfigError::ProvenanceConflict(name.clone()).into());
            }
        }

        Ok(())
    }
}
