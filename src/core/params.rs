//! Parameter file parsing.
//!
//! Reads single-quoted string assignments from a Bicep parameter file:
//!
//! ```text
//! using './main.bicep'
//!
//! param postgresAdminUsername = 'admin'
//! param vnetAddressPrefix = '10.0.0.0/16'
//! ```
//!
//! This is a textual contract, not a Bicep parser. The producer must keep the
//! `param <name> = '<value>'` shape and values must not contain single quotes.
//! No escape processing is applied to the value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{ParamError, Result};

const ASSIGNMENT: &str = r"^\s*param\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*'([^']*)'\s*(//.*)?$";

/// A loaded parameter file.
#[derive(Debug, Clone)]
pub struct ParamFile {
    path: PathBuf,
    contents: String,
}

impl ParamFile {
    /// Read a parameter file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::FileNotFound` if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading parameter file");

        if !path.exists() {
            return Err(ParamError::FileNotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ParamError::Read)?;

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Wrap in-memory contents, reporting `path` in errors.
    pub fn from_contents(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value assigned to `name`, quotes stripped.
    ///
    /// When a parameter is assigned more than once the first assignment wins.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::ParameterNotFound` if no line matches.
    pub fn get(&self, name: &str) -> Result<String> {
        let found = self.assignments().find(|(n, _)| *n == name);

        match found {
            Some((_, value)) => {
                trace!(name, "parameter matched");
                Ok(value.to_string())
            }
            None => Err(ParamError::ParameterNotFound {
                name: name.to_string(),
                path: self.path.display().to_string(),
            }
            .into()),
        }
    }

    /// All single-quoted string parameters in the file.
    pub fn all(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        for (name, value) in self.assignments() {
            params
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        params
    }

    fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        let re = assignment();
        self.contents.lines().filter_map(move |line| {
            let caps = re.captures(line)?;
            Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
        })
    }
}

fn assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ASSIGNMENT).expect("static regex"))
}

/// Read one parameter from a file.
///
/// # Errors
///
/// Returns `ParamError::FileNotFound` or `ParamError::ParameterNotFound`.
pub fn parse_param(path: impl AsRef<Path>, name: &str) -> Result<String> {
    ParamFile::load(path)?.get(name)
}
