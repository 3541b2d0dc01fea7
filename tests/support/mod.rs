//! Test support utilities for secret-relay integration tests.
//!
//! Provides an isolated project directory and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::Path;
use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// Child processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Create an empty project directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Project with `init` run and the parameter and outputs fixtures written.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd(RESOURCE_GROUP);
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t.write(PARAMS_PATH, SAMPLE_PARAMS);
        t.write(OUTPUTS_PATH, SAMPLE_OUTPUTS);
        t
    }

    /// Write a file relative to the project directory.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, contents).expect("failed to write fixture");
    }

    pub fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
