//! Tests for `secret-relay push-env`.

use crate::support::*;

#[test]
fn test_dry_run_lists_exports() {
    let t = Test::new();
    t.write(ENV_PATH, SAMPLE_ENV);

    let output = t.run(&["push-env", "--dry-run"]);
    assert_success(&output);
    assert_stdout_contains(&output, "POSTGRESQL_PASSWORD");
    assert_stdout_contains(&output, "ADMIN_PAT");
    assert_stdout_contains(&output, "PGPASSWORD");
    assert_stdout_contains(&output, "would write 3 secrets");
    assert_stderr_contains(&output, "EMPTY");
    assert_output_excludes(&output, "s3cret");
}

#[test]
fn test_unresolved_reference_warns() {
    let t = Test::new();
    t.write("vars.sh", "export A=$UNSET_SOMEWHERE_ELSE\n");

    let output = t.run(&["push-env", "vars.sh", "--dry-run"]);
    assert_success(&output);
    assert_stderr_contains(&output, "unset variable");
}

#[test]
fn test_missing_env_file_fails() {
    let t = Test::new();

    let output = t.run(&["push-env", "--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "set_env.sh");
}

#[test]
fn test_push_without_token_fails() {
    let t = Test::new();
    t.write(ENV_PATH, SAMPLE_ENV);

    let output = t.run(&["push-env", "--yes"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "token");
}

#[test]
fn test_reserved_export_name_rejected_before_planning() {
    let t = Test::new();
    t.write("vars.sh", "export GITHUB_SHA=abc123\nexport DEPLOY_KEY=k\n");

    let output = t.run(&["push-env", "vars.sh", "--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name 'GITHUB_SHA'");
    assert_output_excludes(&output, "would write");
}
