//! Init command - write a starter config.

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::repo::Repository;
use crate::error::{ConfigError, Result};

/// Create `.secret-relay.toml` in the current directory.
pub fn execute(resource_group: &str, repo: Option<String>) -> Result<()> {
    if Config::exists() {
        return Err(ConfigError::AlreadyInitialized.into());
    }

    let mut config = Config::new(resource_group);
    config.relay.repository = match repo {
        Some(repo) => Some(repo.parse::<Repository>()?.to_string()),
        None => Repository::resolve(None).ok().map(|r| r.to_string()),
    };
    config.validate()?;
    config.save()?;

    info!(resource_group, "initialized");
    output::success(&format!(
        "initialized {}",
        output::path(Config::config_path().display())
    ));
    if config.relay.repository.is_none() {
        output::warn("repository not detected; set `repository` under [relay]");
    }
    output::hint("review the mappings, then run: secret-relay sync --dry-run");
    Ok(())
}
