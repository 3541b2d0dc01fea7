//! Sync command - run the full pipeline.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::info;

use crate::cli::{output, resolve};
use crate::core::config::Config;
use crate::core::deployment::{AzCli, DeploymentSource, OutputsFile};
use crate::core::domain::PublishReport;
use crate::core::relay::{Relay, RunOptions, TlsStatus};
use crate::core::writer::WritePlan;
use crate::error::{ConfigError, Error, Result};

/// Publish every configured secret, or show the plan with `dry_run`.
pub fn execute(
    token: Option<&str>,
    dry_run: bool,
    outputs_file: Option<PathBuf>,
    skip_certs: bool,
) -> Result<()> {
    info!(dry_run, skip_certs, "running sync");

    let config = Config::load()?;
    let source = deployment_source(&config, outputs_file);
    let relay = Relay::new(config);
    let options = RunOptions { skip_certs };
    let manual_value = |name: &str| std::env::var(name).ok();

    if dry_run {
        return preview(&relay, source.as_ref(), token, options, &manual_value);
    }

    let mut store = resolve::github(Some(relay.config()), token)?;
    let repo = store.repository().to_string();
    let report = relay.run(source.as_ref(), &mut store, options, &manual_value)?;

    print_tls(&report.tls);
    print_report(&report.publish);
    output::success(&format!(
        "published {} to {}",
        output::count(report.publish.written.len(), "secret"),
        output::path(&repo)
    ));
    Ok(())
}

fn deployment_source(config: &Config, outputs_file: Option<PathBuf>) -> Box<dyn DeploymentSource> {
    match outputs_file {
        Some(path) => Box::new(OutputsFile::new(path)),
        None => {
            let az = AzCli::new();
            match &config.deployment.subscription {
                Some(sub) => Box::new(az.with_subscription(sub.as_str())),
                None => Box::new(az),
            }
        }
    }
}

/// Dry run: compare against the store when credentials are available.
fn preview(
    relay: &Relay,
    source: &dyn DeploymentSource,
    token: Option<&str>,
    options: RunOptions,
    manual_value: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    let merged = relay.prepare(source, options, manual_value)?;
    let tls = merged.tls.clone();

    let plan = match resolve::github(Some(relay.config()), token) {
        Ok(mut store) => relay.plan(&mut store, merged)?,
        Err(Error::Config(e @ (ConfigError::MissingToken | ConfigError::UnknownRepository))) => {
            output::warn(&format!("store not consulted: {}", e));
            WritePlan::build(merged.secrets, &relay.config().manual, &BTreeSet::new())
        }
        Err(e) => return Err(e),
    };

    print_tls(&tls);
    print_plan(&plan);
    output::success(&format!(
        "dry run: would write {}",
        output::count(plan.writes.len(), "secret")
    ));
    Ok(())
}

pub(crate) fn print_plan(plan: &WritePlan) {
    if !plan.writes.is_empty() {
        output::section("Would write");
        for secret in &plan.writes {
            output::list_item(&format!(
                "{}  {}  {}",
                output::key(secret.name()),
                secret.provenance().label(),
                output::dim(format!("sha256:{}", secret.digest()))
            ));
        }
    }
    print_skipped(&plan.preserved, &plan.unresolved, &plan.skipped_empty);
}

fn print_report(report: &PublishReport) {
    if !report.written.is_empty() {
        output::section("Written");
        for name in &report.written {
            output::list_item(&output::key(name));
        }
    }
    print_skipped(&report.preserved, &report.unresolved, &report.skipped_empty);
}

fn print_skipped(preserved: &[String], unresolved: &[String], empty: &[String]) {
    for name in preserved {
        output::hint(&format!("{} kept (manual, already set)", name));
    }
    for name in unresolved {
        output::warn(&format!(
            "{} is manual and not set in the repository; export it and re-run",
            output::key(name)
        ));
    }
    for name in empty {
        output::warn(&format!("{} has an empty value, skipped", output::key(name)));
    }
}

fn print_tls(tls: &TlsStatus) {
    match tls {
        TlsStatus::Enabled => output::kv("tls", "enabled"),
        TlsStatus::Disabled => output::kv("tls", "disabled (certificate pair not present)"),
        TlsStatus::Rejected(reason) => {
            output::warn(&format!("certificate pair skipped: {}", reason));
            output::kv("tls", "disabled");
        }
    }
}
