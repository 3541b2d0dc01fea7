//! secret-relay - propagate deployment values into GitHub repository secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secret_relay::cli::{execute, output, Cli};
use secret_relay::error::{ConfigError, Error, ErrorKind};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SECRET_RELAY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secret_relay=debug")
        } else {
            EnvFilter::new("secret_relay=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.token) {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::NotInitialized) => Some("run: secret-relay init"),
        Error::Config(ConfigError::UnknownRepository) => {
            Some("set GITHUB_REPOSITORY=owner/name or `repository` under [relay]")
        }
        Error::PartialWrite { .. } => Some("fix the cause and re-run the same command"),
        Error::Deployment(_) if e.kind() == ErrorKind::NotFound => {
            Some("check [deployment] in .secret-relay.toml and that the deployment succeeded")
        }
        _ if e.kind() == ErrorKind::AuthFailure => {
            Some("the token needs admin access to the repository; run: secret-relay verify")
        }
        _ => None,
    }
}
