//! Push-env command - publish an operator env file.
//!
//! Unlike `sync`, existing secrets are overwritten once the operator confirms.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use dialoguer::Confirm;
use tracing::info;

use crate::cli::{output, resolve, sync};
use crate::core::constants;
use crate::core::envfile::EnvFile;
use crate::core::validation;
use crate::core::writer::{self, WritePlan};
use crate::error::Result;

/// Publish every `export` in `file`.
pub fn execute(token: Option<&str>, file: Option<PathBuf>, dry_run: bool, yes: bool) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(constants::DEFAULT_ENV_FILE));
    if !path.is_file() {
        let msg = format!("env file not found: {}", path.display());
        return Err(io::Error::new(io::ErrorKind::NotFound, msg).into());
    }
    info!(path = %path.display(), dry_run, "pushing env file");

    let env = EnvFile::load(&path)?;
    for secret in &env.secrets {
        validation::validate_name(secret.name())?;
    }
    for name in &env.unresolved {
        output::warn(&format!(
            "{} references an unset variable; kept literally",
            output::key(name)
        ));
    }

    let plan = WritePlan::build(env.secrets, &[], &BTreeSet::new());
    if dry_run {
        sync::print_plan(&plan);
        output::success(&format!(
            "dry run: would write {}",
            output::count(plan.writes.len(), "secret")
        ));
        return Ok(());
    }
    if plan.is_empty() {
        output::warn("no exports with values found");
        return Ok(());
    }

    let config = resolve::optional_config()?;
    let mut store = resolve::github(config.as_ref(), token)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Write {} to {}, replacing existing values?",
                output::count(plan.writes.len(), "secret"),
                store.repository()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::warn("aborted");
            return Ok(());
        }
    }

    let report = writer::publish(&mut store, plan)?;
    output::success(&format!(
        "published {} from {}",
        output::count(report.written.len(), "secret"),
        output::path(path.display())
    ));
    Ok(())
}
