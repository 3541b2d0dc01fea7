//! Token, repository and config resolution shared by commands.

use tracing::debug;

use crate::core::config::Config;
use crate::core::repo::Repository;
use crate::core::store::GitHub;
use crate::error::{ConfigError, Result};

/// Token from `--token`/`GITHUB_API_TOKEN`, else `GITHUB_TOKEN`.
///
/// # Errors
///
/// Returns `ConfigError::MissingToken` when neither is set.
pub fn token(flag: Option<&str>) -> Result<String> {
    let usable = |t: &String| !t.trim().is_empty();
    flag.map(str::to_string)
        .filter(usable)
        .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(usable))
        .ok_or_else(|| ConfigError::MissingToken.into())
}

/// Load `.secret-relay.toml` if present.
///
/// # Errors
///
/// Returns parse or validation errors for a present but broken file.
pub fn optional_config() -> Result<Option<Config>> {
    if Config::exists() {
        Config::load().map(Some)
    } else {
        debug!("no config file, using defaults");
        Ok(None)
    }
}

/// Client for the repository the config (or environment) points at.
///
/// # Errors
///
/// Returns `ConfigError::MissingToken` or `ConfigError::UnknownRepository`.
pub fn github(config: Option<&Config>, flag: Option<&str>) -> Result<GitHub> {
    let token = token(flag)?;
    let repo = Repository::resolve(config.and_then(|c| c.relay.repository.as_deref()))?;
    debug!(repository = %repo, "resolved repository");
    GitHub::new(repo, &token)
}
