//! Offline deployment source.
//!
//! Reads a JSON file holding either a single deployment (output of
//! `az deployment group show -o json`) or a list (output of
//! `az deployment group list -o json`). The resource group argument is ignored.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{parse_deployment, parse_deployment_list, Deployment, DeploymentSource};
use crate::error::{DeploymentError, Result};

/// Deployment records captured in a file.
#[derive(Debug, Clone)]
pub struct OutputsFile {
    path: PathBuf,
}

impl OutputsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Deployment>> {
        debug!(path = %self.path.display(), "reading deployment file");

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            DeploymentError::ExtractionFailed(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if contents.trim_start().starts_with('[') {
            parse_deployment_list(&contents)
        } else {
            parse_deployment(&contents).map(|d| vec![d])
        }
    }
}

impl DeploymentSource for OutputsFile {
    fn show(&self, _resource_group: &str, name: &str) -> Result<Option<Deployment>> {
        Ok(self.load()?.into_iter().find(|d| d.name == name))
    }

    fn list(&self, _resource_group: &str) -> Result<Vec<Deployment>> {
        self.load()
    }
}
