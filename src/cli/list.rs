//! List command - show secret names in the repository.

use crate::cli::{output, resolve};
use crate::core::store::SecretStore;
use crate::error::Result;

/// List remote secret names, tagged with their provenance when configured.
pub fn execute(token: Option<&str>) -> Result<()> {
    let config = resolve::optional_config()?;
    let mut store = resolve::github(config.as_ref(), token)?;
    let names = store.list()?;

    output::section(&format!("Secrets in {}", store.repository()));
    if names.is_empty() {
        output::hint("no secrets set");
        return Ok(());
    }

    for name in &names {
        let tag = config
            .as_ref()
            .and_then(|c| c.provenance(name))
            .map(|p| p.label())
            .unwrap_or("-");
        output::list_item(&format!("{} {}", output::key_column(name, 32), output::dim(tag)));
    }
    println!();
    output::kv("total", names.len());
    Ok(())
}
