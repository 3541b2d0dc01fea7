//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables that would leak the developer's environment into a test.
const SCRUBBED: &[&str] = &[
    "GITHUB_API_TOKEN",
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
    "AZURE_RESOURCE_GROUP",
    "SECRET_RELAY_LOG",
    "ADMIN_PAT",
    "POSTGRESQL_PASSWORD",
    "POSTGRESQL_SERVER",
    "POSTGRESQL_USER",
    "POSTGRESQL_PORT",
    "AZURE_STORAGE_ACCOUNT",
    "AZURE_STORAGE_CONTAINER",
    "LETSENCRYPT_CERT",
    "LETSENCRYPT_KEY",
    "TELEMETRY_TOKEN",
];

impl Test {
    /// A `secret-relay` command running in the project directory with a
    /// scrubbed environment and colors off.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("secret-relay").expect("failed to find secret-relay binary");
        for var in SCRUBBED {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("failed to run secret-relay")
    }

    /// Shortcut for `secret-relay init`.
    pub fn init_cmd(&self, resource_group: &str) -> Output {
        self.run(&["init", "-g", resource_group, "--repo", "acme/flight"])
    }

    /// Shortcut for an offline `sync --dry-run` against the outputs fixture.
    pub fn sync_dry_run(&self) -> Output {
        self.run(&["sync", "--dry-run", "--outputs-file", super::OUTPUTS_PATH])
    }
}
