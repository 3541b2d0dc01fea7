//! Env command - preview the container environment.

use crate::cli::output;
use crate::core::constants;
use crate::core::consumer::RuntimeEnv;
use crate::error::{ConfigError, Error, Result};

/// Resolve the container contract from the process environment.
///
/// Values other than the port are never printed.
pub fn execute(check: bool) -> Result<()> {
    let env = match RuntimeEnv::from_process() {
        Ok(env) => env,
        Err(Error::Config(ConfigError::MissingRuntimeVars(missing))) if !check => {
            for name in &missing {
                output::warn(&format!("{} is not set", output::key(name)));
            }
            output::hint("re-run with --check to fail on missing variables");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    output::section("Container environment");
    for name in env.names() {
        if name == constants::PORT_VAR {
            output::kv(name, env.get(name).unwrap_or_default());
        } else {
            output::list_item(&output::key(name));
        }
    }
    println!();
    let tls = if env.tls_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    output::kv("tls", tls);
    output::success("all required variables set");
    Ok(())
}
