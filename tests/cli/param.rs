//! Tests for `secret-relay param`.

use crate::support::*;

#[test]
fn test_param_prints_raw_value() {
    let t = Test::new();
    t.write(PARAMS_PATH, SAMPLE_PARAMS);

    let output = t.run(&["param", "postgresAdminUsername"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "admin\n");
}

#[test]
fn test_param_uses_explicit_file() {
    let t = Test::new();
    t.write("other.bicepparam", "param region = 'northeurope'\n");

    let output = t.run(&["param", "region", "--file", "other.bicepparam"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "northeurope");
}

#[test]
fn test_param_missing_name_fails() {
    let t = Test::new();
    t.write(PARAMS_PATH, SAMPLE_PARAMS);

    let output = t.run(&["param", "postgresAdminPassword"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "postgresAdminPassword");
}

#[test]
fn test_param_missing_file_fails() {
    let t = Test::new();

    let output = t.run(&["param", "anything"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
}
