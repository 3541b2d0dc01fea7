//! Deployment output extraction.
//!
//! Reads the outputs recorded by an Azure resource-group deployment. A
//! [`DeploymentSource`] answers two read-only queries (show one deployment by
//! name, list all deployments in a resource group) and [`extract`] applies the
//! lookup policy on top:
//!
//! 1. the named deployment, if it exists and succeeded;
//! 2. otherwise the most recent succeeded deployment by timestamp;
//! 3. otherwise `DeploymentNotFound`.
//!
//! There is no retry beyond that single fallback query.
//!
//! ## Sources
//!
//! - [`AzCli`]: shells out to `az deployment group show|list -o json`.
//! - [`OutputsFile`]: a JSON file captured from the same commands, for dry runs
//!   and pipelines that already fetched the outputs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::types::OutputName;
use crate::error::{DeploymentError, Result};

mod az;
mod file;

pub use az::AzCli;
pub use file::OutputsFile;

/// Provisioning state reported for a finished, successful deployment.
pub const SUCCEEDED: &str = "Succeeded";

/// Read-only access to deployment records.
pub trait DeploymentSource {
    /// Look up a deployment by name. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DeploymentError::ExtractionFailed` on tooling or API failure.
    fn show(&self, resource_group: &str, name: &str) -> Result<Option<Deployment>>;

    /// All deployments recorded in the resource group, in any order.
    ///
    /// # Errors
    ///
    /// Returns `DeploymentError::ExtractionFailed` on tooling or API failure.
    fn list(&self, resource_group: &str) -> Result<Vec<Deployment>>;
}

/// One deployment record.
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub name: String,
    pub provisioning_state: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub outputs: Outputs,
}

impl Deployment {
    pub fn succeeded(&self) -> bool {
        self.provisioning_state == SUCCEEDED
    }
}

/// Outputs of one successful deployment, rendered as strings.
///
/// Immutable once extracted; the next deployment supersedes rather than merges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    values: BTreeMap<OutputName, String>,
}

impl Outputs {
    pub fn new(values: BTreeMap<OutputName, String>) -> Self {
        Self { values }
    }

    /// Value of a required output.
    ///
    /// # Errors
    ///
    /// Returns `DeploymentError::OutputMissing` if the key is absent.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DeploymentError::OutputMissing(name.to_string()).into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for Outputs {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Extract the outputs of the deployment to publish from.
///
/// # Errors
///
/// Returns `DeploymentError::DeploymentNotFound` when neither the named
/// deployment nor any other deployment in the group succeeded, and
/// `DeploymentError::ExtractionFailed` when the source itself fails.
pub fn extract(source: &dyn DeploymentSource, resource_group: &str, name: &str) -> Result<Outputs> {
    debug!(resource_group, name, "extracting deployment outputs");

    match source.show(resource_group, name)? {
        Some(deployment) if deployment.succeeded() => {
            info!(
                deployment = %deployment.name,
                outputs = deployment.outputs.len(),
                "using named deployment"
            );
            return Ok(deployment.outputs);
        }
        Some(deployment) => {
            warn!(
                deployment = %deployment.name,
                state = %deployment.provisioning_state,
                "named deployment did not succeed, falling back to latest success"
            );
        }
        None => {
            debug!(name, "named deployment not found, falling back to latest success");
        }
    }

    let latest = source
        .list(resource_group)?
        .into_iter()
        .filter(Deployment::succeeded)
        .max_by_key(|d| d.timestamp);

    match latest {
        Some(deployment) => {
            info!(
                deployment = %deployment.name,
                outputs = deployment.outputs.len(),
                "using latest successful deployment"
            );
            Ok(deployment.outputs)
        }
        None => Err(DeploymentError::DeploymentNotFound {
            resource_group: resource_group.to_string(),
            name: name.to_string(),
        }
        .into()),
    }
}

/// Deployment record as printed by `az deployment group show -o json`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDeployment {
    name: String,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperties {
    #[serde(default)]
    provisioning_state: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    outputs: Option<BTreeMap<String, RawOutput>>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    #[serde(default)]
    value: Value,
}

impl From<RawDeployment> for Deployment {
    fn from(raw: RawDeployment) -> Self {
        let outputs = raw
            .properties
            .outputs
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, render_value(v.value)))
            .collect();

        Self {
            name: raw.name,
            provisioning_state: raw.properties.provisioning_state,
            timestamp: raw.properties.timestamp,
            outputs,
        }
    }
}

/// Strings pass through verbatim; everything else becomes its JSON text.
fn render_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn parse_deployment(json: &str) -> Result<Deployment> {
    let raw: RawDeployment = serde_json::from_str(json)
        .map_err(|e| DeploymentError::ExtractionFailed(format!("invalid deployment JSON: {}", e)))?;
    Ok(raw.into())
}

pub(crate) fn parse_deployment_list(json: &str) -> Result<Vec<Deployment>> {
    let raw: Vec<RawDeployment> = serde_json::from_str(json).map_err(|e| {
        DeploymentError::ExtractionFailed(format!("invalid deployment list JSON: {}", e))
    })?;
    Ok(raw.into_iter().map(Deployment::from).collect())
}
