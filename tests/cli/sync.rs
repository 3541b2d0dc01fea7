//! Tests for `secret-relay sync` (offline dry runs).

use crate::support::*;

#[test]
fn test_dry_run_lists_batch_without_values() {
    let t = Test::init();

    let output = t.sync_dry_run();
    assert_success(&output);
    assert_stdout_contains(&output, "POSTGRESQL_SERVER");
    assert_stdout_contains(&output, "AZURE_STORAGE_ACCOUNT");
    assert_stdout_contains(&output, "POSTGRESQL_USER");
    assert_stdout_contains(&output, "would write 3 secrets");
    assert_stdout_contains(&output, "sha256:");
    assert_output_excludes(&output, "db.example.com");
    assert_output_excludes(&output, "stacct123");
}

#[test]
fn test_dry_run_without_token_warns() {
    let t = Test::init();

    let output = t.sync_dry_run();
    assert_success(&output);
    assert_stderr_contains(&output, "store not consulted");
}

#[test]
fn test_dry_run_reports_unset_manual_secrets() {
    let t = Test::init();

    let output = t.sync_dry_run();
    assert_stderr_contains(&output, "ADMIN_PAT");
    assert_stderr_contains(&output, "POSTGRESQL_PASSWORD");
}

#[test]
fn test_dry_run_includes_manual_value_from_environment() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["sync", "--dry-run", "--outputs-file", OUTPUTS_PATH])
        .env("POSTGRESQL_PASSWORD", "hunter2")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "would write 4 secrets");
    assert_output_excludes(&output, "hunter2");
}

#[test]
fn test_dry_run_with_certificates_enables_tls() {
    let t = Test::init();
    t.write(&format!("{}/letsencrypt-server.crt", CERT_DIR), CERT_PEM);
    t.write(&format!("{}/letsencrypt-server.key", CERT_DIR), KEY_PEM);

    let output = t.sync_dry_run();
    assert_success(&output);
    assert_stdout_contains(&output, "LETSENCRYPT_CERT");
    assert_stdout_contains(&output, "enabled");
    assert_output_excludes(&output, "BEGIN PRIVATE KEY");
}

#[test]
fn test_skip_certs_leaves_pair_out() {
    let t = Test::init();
    t.write(&format!("{}/letsencrypt-server.crt", CERT_DIR), CERT_PEM);
    t.write(&format!("{}/letsencrypt-server.key", CERT_DIR), KEY_PEM);

    let output = t.run(&[
        "sync",
        "--dry-run",
        "--skip-certs",
        "--outputs-file",
        OUTPUTS_PATH,
    ]);
    assert_success(&output);
    assert!(!stdout(&output).contains("LETSENCRYPT_CERT"));
}

#[test]
fn test_malformed_certificate_is_skipped() {
    let t = Test::init();
    t.write(&format!("{}/letsencrypt-server.crt", CERT_DIR), "garbage");
    t.write(&format!("{}/letsencrypt-server.key", CERT_DIR), KEY_PEM);

    let output = t.sync_dry_run();
    assert_success(&output);
    assert_stderr_contains(&output, "certificate pair skipped");
    assert_stdout_contains(&output, "would write 3 secrets");
}

#[test]
fn test_no_successful_deployment_fails() {
    let t = Test::init();
    t.write(OUTPUTS_PATH, FAILED_OUTPUTS);

    let output = t.sync_dry_run();
    assert_failure(&output);
    assert_stderr_contains(&output, "no successful deployment");
}

#[test]
fn test_missing_output_fails() {
    let t = Test::init();
    t.write(
        OUTPUTS_PATH,
        r#"{"name":"main","properties":{"provisioningState":"Succeeded","outputs":{}}}"#,
    );

    let output = t.sync_dry_run();
    assert_failure(&output);
    assert_stderr_contains(&output, "is missing");
}

#[test]
fn test_sync_without_token_fails() {
    let t = Test::init();

    let output = t.run(&["sync", "--outputs-file", OUTPUTS_PATH]);
    assert_failure(&output);
    assert_stderr_contains(&output, "token");
}
