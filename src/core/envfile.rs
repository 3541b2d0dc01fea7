//! Operator env file parsing.
//!
//! Reads the shell script operators keep their hand-set secrets in:
//!
//! ```text
//! # Database
//! export POSTGRESQL_PASSWORD='s3cret'
//! export ADMIN_PAT="ghp_abc"
//! export PGPASSWORD=$POSTGRESQL_PASSWORD
//! ```
//!
//! Only `export NAME=value` lines are read. Matching outer quotes are stripped.
//! A value that is a single `$NAME` or `${NAME}` reference resolves against the
//! file first, then the process environment; unresolved references are kept
//! literally and reported.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::core::domain::Secret;
use crate::error::Result;

const EXPORT_LINE: &str = r"^export\s+([A-Z_][A-Z0-9_]*)=(.*)$";

/// Parsed env file.
#[derive(Debug, Default)]
pub struct EnvFile {
    /// Entries in file order; later duplicates replace earlier values in place
    pub secrets: Vec<Secret>,
    /// Names whose `$REF` value could not be resolved
    pub unresolved: Vec<String>,
}

impl EnvFile {
    /// Read and parse an env file, resolving references against the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading env file");

        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse_with(&contents, |name| std::env::var(name).ok()))
    }

    /// Parse env file text with a custom fallback lookup.
    ///
    /// A lookup that yields an empty string counts as unset.
    pub fn parse_with(contents: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let raw = raw_exports(contents);
        let mut parsed = Self::default();

        for (name, value) in &raw {
            let resolved = match reference(value) {
                Some(target) => {
                    let from_file = raw
                        .iter()
                        .find(|(n, _)| n == target)
                        .map(|(_, v)| v.clone());
                    let found = from_file.or_else(|| lookup(target).filter(|v| !v.is_empty()));
                    match found {
                        Some(v) => v,
                        None => {
                            warn!(name = %name, reference = %target, "unresolved reference");
                            parsed.unresolved.push(name.clone());
                            value.clone()
                        }
                    }
                }
                None => value.clone(),
            };
            parsed.secrets.push(Secret::manual(name.as_str(), resolved));
        }

        parsed
    }
}

/// `export` assignments in file order, deduplicated (last value wins).
fn raw_exports(contents: &str) -> Vec<(String, String)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(EXPORT_LINE).expect("static regex"));

    let mut exports: Vec<(String, String)> = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(caps) = re.captures(line) else {
            continue;
        };

        let name = caps[1].to_string();
        let value = unquote(caps[2].trim()).to_string();
        match exports.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => exports.push((name, value)),
        }
    }
    exports
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Target of a whole-value `$NAME` / `${NAME}` reference.
fn reference(value: &str) -> Option<&str> {
    let rest = value.strip_prefix('$')?;
    let name = rest
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .unwrap_or(rest);
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}
