//! Tests for `secret-relay init`.

use crate::support::*;
use std::fs;

#[test]
fn test_init_writes_starter_config() {
    let t = Test::new();

    let output = t.init_cmd("rg-flight");
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    let config = fs::read_to_string(t.path(".secret-relay.toml")).unwrap();
    assert!(config.contains("resource_group = \"rg-flight\""));
    assert!(config.contains("repository = \"acme/flight\""));
    assert!(config.contains("POSTGRESQL_SERVER = \"postgresServerFqdn\""));
    assert!(config.contains("ADMIN_PAT"));
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init();

    let output = t.init_cmd("rg-flight");
    assert_failure(&output);
    assert_stderr_contains(&output, "already initialized");
}

#[test]
fn test_init_rejects_malformed_repository() {
    let t = Test::new();

    let output = t.run(&["init", "-g", "rg", "--repo", "not-a-repo"]);
    assert_failure(&output);
    assert!(!t.path(".secret-relay.toml").exists());
}

#[test]
fn test_init_requires_resource_group() {
    let t = Test::new();

    let output = t.run(&["init"]);
    assert_failure(&output);
}
