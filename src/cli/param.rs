//! Param command - print one parameter value.

use std::path::PathBuf;

use crate::cli::resolve;
use crate::core::constants;
use crate::core::params;
use crate::error::Result;

/// Print the raw value so workflows can capture it.
pub fn execute(name: &str, file: Option<PathBuf>) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => resolve::optional_config()?
            .map(|c| c.params.file)
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_PARAMS_FILE)),
    };

    let value = params::parse_param(&path, name)?;
    println!("{}", value);
    Ok(())
}
