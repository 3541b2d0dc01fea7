//! Certs command - publish only the TLS certificate pair.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{output, resolve};
use crate::core::certs::CertificateSet;
use crate::core::constants;
use crate::core::writer;
use crate::error::Result;

/// Upload the certificate pair from `dir` (or the configured directory).
pub fn execute(token: Option<&str>, dir: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let config = resolve::optional_config()?;
    let dir = dir
        .or_else(|| config.as_ref().map(|c| c.certs.dir.clone()))
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_CERT_DIR));
    info!(dir = %dir.display(), dry_run, "publishing certificates");

    let pair = match CertificateSet::load(&dir)? {
        CertificateSet::Enabled(pair) => pair,
        CertificateSet::Disabled { missing } => {
            for path in &missing {
                output::warn(&format!("missing {}", output::path(path.display())));
            }
            output::hint("TLS will be disabled; nothing to publish");
            return Ok(());
        }
    };

    if dry_run {
        describe(&dir.join(constants::CERT_FILE), pair.cert());
        describe(&dir.join(constants::KEY_FILE), pair.key());
        output::success("dry run: certificate pair is well-formed");
        return Ok(());
    }

    let mut store = resolve::github(config.as_ref(), token)?;
    let report = writer::write_all(&mut store, pair.secrets(), &[])?;
    output::success(&format!(
        "published {} to {}",
        output::count(report.written.len(), "secret"),
        output::path(store.repository())
    ));
    Ok(())
}

/// First line, last line and line count; never the body.
fn describe(path: &Path, content: &str) {
    let lines: Vec<&str> = content.lines().collect();
    output::section(&path.display().to_string());
    output::kv("first", lines.first().copied().unwrap_or_default());
    output::kv("last ", lines.last().copied().unwrap_or_default());
    output::kv("lines", lines.len());
}
