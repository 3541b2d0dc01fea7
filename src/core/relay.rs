//! The secrets pipeline.
//!
//! [`Relay`] owns the configuration and drives one run through its stages:
//!
//! ```text
//! ParamsLoaded -> OutputsExtracted -> SecretsMerged -> Published
//! ```
//!
//! A failure at any stage aborts the run. Extraction failures happen before
//! the store is touched; a publish failure may leave earlier writes in place.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::certs::CertificateSet;
use crate::core::config::Config;
use crate::core::deployment::{self, DeploymentSource, Outputs};
use crate::core::domain::{PublishReport, Secret, Stage};
use crate::core::params::ParamFile;
use crate::core::store::SecretStore;
use crate::core::writer::{self, WritePlan};
use crate::error::{Error, Result};

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Leave the certificate pair out of the batch
    pub skip_certs: bool,
}

/// TLS decision derived from the certificate directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsStatus {
    /// Pair present and well-formed; included in the batch
    Enabled,
    /// Pair incomplete or certificates disabled in config
    Disabled,
    /// Pair present but malformed; skipped
    Rejected(String),
}

/// Everything a run decided before writing.
#[derive(Debug)]
pub struct Merged {
    pub secrets: Vec<Secret>,
    pub tls: TlsStatus,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct RunReport {
    pub stage: Stage,
    pub tls: TlsStatus,
    pub publish: PublishReport,
}

/// Pipeline bound to one configuration.
#[derive(Debug, Clone)]
pub struct Relay {
    config: Config,
    root: PathBuf,
}

impl Relay {
    /// Relay resolving relative paths against the current directory.
    pub fn new(config: Config) -> Self {
        Self::with_root(config, ".")
    }

    /// Relay resolving relative paths against `root`.
    pub fn with_root(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Load the parameter file, or `None` when no secret comes from it.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::FileNotFound` if the file is needed but absent.
    pub fn load_params(&self) -> Result<Option<ParamFile>> {
        if self.config.params.secrets.is_empty() {
            return Ok(None);
        }
        ParamFile::load(self.resolve(&self.config.params.file)).map(Some)
    }

    /// Extract outputs of the configured deployment.
    ///
    /// # Errors
    ///
    /// See [`deployment::extract`].
    pub fn extract(&self, source: &dyn DeploymentSource) -> Result<Outputs> {
        let d = &self.config.deployment;
        deployment::extract(source, &d.resource_group, &d.name)
    }

    /// Load the certificate pair, downgrading a malformed pair to a warning.
    ///
    /// # Errors
    ///
    /// Returns `CertError::Read` when a file exists but cannot be read. A
    /// pair that is binary or lacks its PEM markers yields
    /// `TlsStatus::Rejected` instead.
    pub fn load_certs(&self) -> Result<(TlsStatus, Vec<Secret>)> {
        if !self.config.certs.enabled {
            return Ok((TlsStatus::Disabled, Vec::new()));
        }

        match CertificateSet::load(self.resolve(&self.config.certs.dir)) {
            Ok(CertificateSet::Enabled(pair)) => Ok((TlsStatus::Enabled, pair.secrets())),
            Ok(CertificateSet::Disabled { .. }) => Ok((TlsStatus::Disabled, Vec::new())),
            Err(Error::Cert(e @ crate::error::CertError::InvalidCertificateFormat { .. })) => {
                warn!(error = %e, "skipping certificate pair");
                Ok((TlsStatus::Rejected(e.to_string()), Vec::new()))
            }
            Err(e) => Err(e),
        }
    }

    /// Combine parameters, outputs, constants, certificates and manual values.
    ///
    /// `manual_value` supplies operator values for manual secrets; names it
    /// returns `None` for are left to the writer to preserve or report.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::ParameterNotFound` or `DeploymentError::OutputMissing`
    /// for any mapped source that is absent.
    pub fn merge(
        &self,
        params: Option<&ParamFile>,
        outputs: &Outputs,
        certs: Vec<Secret>,
        manual_value: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Vec<Secret>> {
        let mut secrets = Vec::new();

        if let Some(params) = params {
            for (name, param) in &self.config.params.secrets {
                secrets.push(Secret::auto(name.as_str(), params.get(param)?));
            }
        }

        for (name, output) in &self.config.outputs {
            secrets.push(Secret::auto(name.as_str(), outputs.require(output)?));
        }

        for (name, value) in &self.config.constants {
            secrets.push(Secret::auto(name.as_str(), value.as_str()));
        }

        secrets.extend(certs);

        for name in &self.config.manual {
            if let Some(value) = manual_value(name) {
                secrets.push(Secret::manual(name.as_str(), value));
            }
        }

        Ok(secrets)
    }

    /// Run stages up to `SecretsMerged`.
    ///
    /// # Errors
    ///
    /// Any parameter, extraction or certificate I/O error.
    pub fn prepare(
        &self,
        source: &dyn DeploymentSource,
        options: RunOptions,
        manual_value: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Merged> {
        let params = self.load_params()?;
        info!(stage = %Stage::ParamsLoaded);

        let outputs = self.extract(source)?;
        info!(stage = %Stage::OutputsExtracted, outputs = outputs.len());

        let (tls, certs) = if options.skip_certs {
            (TlsStatus::Disabled, Vec::new())
        } else {
            self.load_certs()?
        };
        let secrets = self.merge(params.as_ref(), &outputs, certs, manual_value)?;
        info!(stage = %Stage::SecretsMerged, secrets = secrets.len());

        Ok(Merged { secrets, tls })
    }

    /// Build the write plan for merged secrets against the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be listed.
    pub fn plan(&self, store: &mut dyn SecretStore, merged: Merged) -> Result<WritePlan> {
        writer::plan(store, merged.secrets, &self.config.manual)
    }

    /// Run the whole pipeline.
    ///
    /// # Errors
    ///
    /// Any stage error; `Error::PartialWrite` when publishing stopped midway.
    pub fn run(
        &self,
        source: &dyn DeploymentSource,
        store: &mut dyn SecretStore,
        options: RunOptions,
        manual_value: &dyn Fn(&str) -> Option<String>,
    ) -> Result<RunReport> {
        let merged = self.prepare(source, options, manual_value)?;
        let tls = merged.tls.clone();

        let plan = self.plan(store, merged)?;
        let publish = writer::publish(store, plan)?;
        info!(stage = %Stage::Published, written = publish.written.len());

        Ok(RunReport {
            stage: Stage::Published,
            tls,
            publish,
        })
    }
}
