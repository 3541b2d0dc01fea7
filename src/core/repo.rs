//! Repository identification.
//!
//! The secret store is keyed by `owner/name`. Resolution order: explicit value
//! (config or flag), `GITHUB_REPOSITORY`, then the `origin` remote URL.

use std::fmt;
use std::process::Command;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Error, Result};

const REMOTE_PATTERN: &str = r"github\.com[:/]([^/]+)/([^/]+?)(\.git)?$";

/// A GitHub repository (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `https://github.com/o/r(.git)` or `git@github.com:o/r(.git)` URL.
    pub fn from_remote_url(url: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(REMOTE_PATTERN).expect("static regex"));

        let caps = re.captures(url.trim())?;
        Some(Self::new(&caps[1], &caps[2]))
    }

    /// Resolve the repository to publish to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownRepository` if no source yields one.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        if let Some(value) = explicit {
            return value.parse();
        }

        if let Ok(value) = std::env::var("GITHUB_REPOSITORY") {
            debug!(repository = %value, "using GITHUB_REPOSITORY");
            return value.parse();
        }

        let remote = Command::new("git")
            .args(["remote", "get-url", "origin"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string());

        remote
            .as_deref()
            .and_then(Self::from_remote_url)
            .inspect(|repo| debug!(repository = %repo, "using origin remote"))
            .ok_or_else(|| ConfigError::UnknownRepository.into())
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(ConfigError::InvalidValue {
                field: "repository",
                reason: format!("expected owner/name, got '{}'", s),
            }
            .into()),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
