//! Runtime environment contract of the deployed container.
//!
//! The workflow step that starts the container maps secrets onto environment
//! variables. [`RuntimeEnv::resolve`] applies the same rules so an operator can
//! check what the container will see before deploying.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Resolved container environment.
pub struct RuntimeEnv {
    vars: BTreeMap<String, String>,
    tls: bool,
}

impl std::fmt::Debug for RuntimeEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeEnv")
            .field("vars", &self.vars.keys().collect::<Vec<_>>())
            .field("tls", &self.tls)
            .finish()
    }
}

impl RuntimeEnv {
    /// Resolve the contract against `lookup`, treating empty values as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRuntimeVars` naming every required
    /// variable that is unset or empty.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut vars = BTreeMap::new();
        let mut missing = Vec::new();
        for &name in constants::REQUIRED_RUNTIME_VARS {
            match get(name) {
                Some(value) => {
                    vars.insert(name.to_string(), value);
                }
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingRuntimeVars(missing).into());
        }

        let port = get(constants::PORT_VAR)
            .unwrap_or_else(|| constants::DEFAULT_PORT.to_string());
        vars.insert(constants::PORT_VAR.to_string(), port);

        if let Some(token) = get(constants::TELEMETRY_VAR) {
            vars.insert(constants::TELEMETRY_VAR.to_string(), token);
        }

        let cert = get(constants::CERT_SECRET);
        let key = get(constants::KEY_SECRET);
        let tls = match (cert, key) {
            (Some(cert), Some(key)) => {
                vars.insert(constants::CERT_SECRET.to_string(), cert);
                vars.insert(constants::KEY_SECRET.to_string(), key);
                true
            }
            _ => false,
        };

        debug!(vars = vars.len(), tls, "runtime environment resolved");
        Ok(Self { vars, tls })
    }

    /// Resolve against the current process environment.
    ///
    /// # Errors
    ///
    /// See [`RuntimeEnv::resolve`].
    pub fn from_process() -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}
