//! Verify command - check the token against the repository.

use crate::cli::{output, resolve};
use crate::error::Result;

pub fn execute(token: Option<&str>) -> Result<()> {
    let config = resolve::optional_config()?;
    let store = resolve::github(config.as_ref(), token)?;
    let access = store.verify()?;

    output::kv("user      ", &access.login);
    output::kv("repository", store.repository());
    if access.admin {
        output::success("token can manage repository secrets");
    } else {
        output::warn("token lacks admin permission; secret writes will be rejected");
    }
    Ok(())
}
