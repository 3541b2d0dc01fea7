//! Azure CLI deployment source.
//!
//! Queries deployment records through the `az` CLI, which handles login and
//! subscription selection. Requires `az login` (or a federated CI login) to
//! have happened beforehand.

use std::process::Command;

use tracing::trace;

use super::{parse_deployment, parse_deployment_list, Deployment, DeploymentSource};
use crate::error::{DeploymentError, Result};

/// Deployment source backed by `az deployment group`.
#[derive(Debug, Clone)]
pub struct AzCli {
    program: String,
    subscription: Option<String>,
}

impl AzCli {
    pub fn new() -> Self {
        Self {
            program: "az".to_string(),
            subscription: None,
        }
    }

    /// Query a specific subscription instead of the CLI default.
    pub fn with_subscription(mut self, subscription: impl Into<String>) -> Self {
        self.subscription = Some(subscription.into());
        self
    }

    /// Fail early with a readable message if `az` is not on PATH.
    fn check_az(&self) -> Result<()> {
        which::which(&self.program).map_err(|_| {
            DeploymentError::ExtractionFailed(
                "az CLI not found. Install it from https://learn.microsoft.com/cli/azure/install-azure-cli"
                    .to_string(),
            )
        })?;
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        self.check_az()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(args).args(["--output", "json"]);
        if let Some(sub) = &self.subscription {
            cmd.args(["--subscription", sub]);
        }
        trace!(?args, "running az");

        cmd.output().map_err(|e| {
            DeploymentError::ExtractionFailed(format!("failed to run az: {}", e)).into()
        })
    }
}

impl Default for AzCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DeploymentSource for AzCli {
    fn show(&self, resource_group: &str, name: &str) -> Result<Option<Deployment>> {
        let output = self.run(&[
            "deployment",
            "group",
            "show",
            "--resource-group",
            resource_group,
            "--name",
            name,
        ])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_not_found(&stderr) {
                return Ok(None);
            }
            return Err(DeploymentError::ExtractionFailed(format!(
                "az deployment group show failed: {}",
                stderr.trim()
            ))
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_deployment(&stdout).map(Some)
    }

    fn list(&self, resource_group: &str) -> Result<Vec<Deployment>> {
        let output = self.run(&[
            "deployment",
            "group",
            "list",
            "--resource-group",
            resource_group,
        ])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeploymentError::ExtractionFailed(format!(
                "az deployment group list failed: {}",
                stderr.trim()
            ))
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_deployment_list(&stdout)
    }
}

/// Whether `az` stderr says the deployment does not exist.
fn is_not_found(stderr: &str) -> bool {
    stderr.contains("DeploymentNotFound") || stderr.contains("could not be found")
}
