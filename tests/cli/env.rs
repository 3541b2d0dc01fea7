//! Tests for `secret-relay env`.

use crate::support::*;

fn with_required(t: &Test) -> assert_cmd::Command {
    let mut cmd = t.cmd();
    cmd.env("POSTGRESQL_SERVER", "db.example.com")
        .env("POSTGRESQL_USER", "admin")
        .env("POSTGRESQL_PASSWORD", "hunter2")
        .env("AZURE_STORAGE_ACCOUNT", "stacct123")
        .env("AZURE_STORAGE_CONTAINER", "data");
    cmd
}

#[test]
fn test_env_defaults_port_and_disables_tls() {
    let t = Test::new();

    let output = with_required(&t).args(["env", "--check"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "5432");
    assert_stdout_contains(&output, "tls  disabled");
    assert_output_excludes(&output, "hunter2");
}

#[test]
fn test_env_enables_tls_with_both_values() {
    let t = Test::new();

    let output = with_required(&t)
        .env("LETSENCRYPT_CERT", CERT_PEM)
        .env("LETSENCRYPT_KEY", KEY_PEM)
        .args(["env", "--check"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "tls  enabled");
}

#[test]
fn test_env_check_fails_on_missing_required() {
    let t = Test::new();

    let output = t.run(&["env", "--check"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "POSTGRESQL_SERVER");
}

#[test]
fn test_env_without_check_only_warns() {
    let t = Test::new();

    let output = t.run(&["env"]);
    assert_success(&output);
    assert_stderr_contains(&output, "AZURE_STORAGE_CONTAINER is not set");
}
