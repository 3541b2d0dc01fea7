//! Error reporting across commands.

use crate::support::*;

#[test]
fn test_sync_without_config_hints_init() {
    let t = Test::new();

    let output = t.run(&["sync", "--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
    assert_stderr_contains(&output, "secret-relay init");
}

#[test]
fn test_conflicting_provenance_rejected() {
    let t = Test::init();
    let config = std::fs::read_to_string(t.path(".secret-relay.toml")).unwrap();
    let config = config.replacen(
        "manual = [",
        "manual = [\n    \"POSTGRESQL_SERVER\",",
        1,
    );
    t.write(".secret-relay.toml", &config);

    let output = t.sync_dry_run();
    assert_failure(&output);
    assert_stderr_contains(&output, "both manual and auto-derived");
}

#[test]
fn test_list_without_token_fails() {
    let t = Test::init();

    let output = t.run(&["list"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "GITHUB_API_TOKEN");
}

#[test]
fn test_completions_generate() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    assert_stdout_contains(&output, "secret-relay");
}

#[test]
fn test_rm_refuses_manual_secret_without_force() {
    let t = Test::init();

    let output = t.run(&["rm", "ADMIN_PAT", "--yes"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--force");
}

#[test]
fn test_rm_with_force_still_needs_token() {
    let t = Test::init();

    let output = t.run(&["rm", "ADMIN_PAT", "--force", "--yes"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "token");
}

#[test]
fn test_rm_rejects_invalid_name_before_token() {
    let t = Test::init();

    let output = t.run(&["rm", "bad-name", "--yes"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name 'bad-name'");
}
