//! Rm command - delete secrets from the repository.

use dialoguer::Confirm;
use tracing::info;

use crate::cli::{output, resolve};
use crate::core::domain::Provenance;
use crate::core::store::SecretStore;
use crate::core::validation;
use crate::error::{Error, Result};

/// Delete `names`. Manual secrets need `force`.
pub fn execute(token: Option<&str>, names: &[String], force: bool, yes: bool) -> Result<()> {
    for name in names {
        validation::validate_name(name)?;
    }
    let config = resolve::optional_config()?;

    if !force {
        let manual: Vec<&str> = names
            .iter()
            .filter(|n| {
                config.as_ref().and_then(|c| c.provenance(n)) == Some(Provenance::Manual)
            })
            .map(String::as_str)
            .collect();
        if !manual.is_empty() {
            return Err(Error::Other(format!(
                "refusing to delete manual secrets without --force: {}",
                manual.join(", ")
            )));
        }
    }

    let mut store = resolve::github(config.as_ref(), token)?;
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} from {}?",
                output::count(names.len(), "secret"),
                store.repository()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::warn("aborted");
            return Ok(());
        }
    }

    for name in names {
        store.delete(name)?;
        info!(name = %name, "deleted");
        output::success(&format!("deleted {}", output::key(name)));
    }
    Ok(())
}
