//! Command-line interface.

pub mod certs;
pub mod completions;
pub mod env;
pub mod init;
pub mod list;
pub mod output;
pub mod param;
pub mod push_env;
pub mod resolve;
pub mod rm;
pub mod sync;
pub mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// secret-relay - propagate deployment values into GitHub repository secrets.
#[derive(Parser)]
#[command(
    name = "secret-relay",
    about = "Propagate deployment parameters and outputs into GitHub repository secrets",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitHub token with admin access to the repository (falls back to GITHUB_TOKEN)
    #[arg(long, global = true, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write a starter .secret-relay.toml
    Init {
        /// Resource group holding the deployment
        #[arg(short = 'g', long, env = "AZURE_RESOURCE_GROUP")]
        resource_group: String,
        /// Target repository as owner/name (detected from git if omitted)
        #[arg(long)]
        repo: Option<String>,
    },

    /// Publish parameters, deployment outputs, constants and certificates
    Sync {
        /// Show what would be written without writing
        #[arg(long)]
        dry_run: bool,
        /// Read deployment records from a JSON file instead of the az CLI
        #[arg(long, value_name = "FILE")]
        outputs_file: Option<PathBuf>,
        /// Leave the certificate pair out
        #[arg(long)]
        skip_certs: bool,
    },

    /// Publish only the TLS certificate pair
    Certs {
        /// Certificate directory (defaults to the configured one)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Show the files without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Publish every export in an operator env file, overwriting existing values
    PushEnv {
        /// Env file (defaults to secrets/set_env.sh)
        file: Option<PathBuf>,
        /// Show what would be written without writing
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List secret names in the repository
    List,

    /// Delete secrets from the repository
    Rm {
        /// Secret names
        #[arg(required = true)]
        names: Vec<String>,
        /// Allow deleting manual secrets
        #[arg(long)]
        force: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Check the token and repository access
    Verify,

    /// Print one parameter value from the parameter file
    Param {
        /// Parameter name
        name: String,
        /// Parameter file (defaults to the configured one)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Show the container environment resolved from the current process
    Env {
        /// Fail when a required variable is missing
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, token: Option<String>) -> crate::error::Result<()> {
    use Command::*;

    let token = token.as_deref();
    match command {
        Init {
            resource_group,
            repo,
        } => init::execute(&resource_group, repo),
        Sync {
            dry_run,
            outputs_file,
            skip_certs,
        } => sync::execute(token, dry_run, outputs_file, skip_certs),
        Certs { dir, dry_run } => certs::execute(token, dir, dry_run),
        PushEnv { file, dry_run, yes } => push_env::execute(token, file, dry_run, yes),
        List => list::execute(token),
        Rm { names, force, yes } => rm::execute(token, &names, force, yes),
        Verify => verify::execute(token),
        Param { name, file } => param::execute(&name, file),
        Env { check } => env::execute(check),
        Completions { shell } => completions::execute(shell),
    }
}
