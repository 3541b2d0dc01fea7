//! Tests for `secret-relay certs`.

use crate::support::*;

#[test]
fn test_dry_run_shows_markers_not_body() {
    let t = Test::new();
    t.write(&format!("{}/letsencrypt-server.crt", CERT_DIR), CERT_PEM);
    t.write(&format!("{}/letsencrypt-server.key", CERT_DIR), KEY_PEM);

    let output = t.run(&["certs", "--dry-run"]);
    assert_success(&output);
    assert_stdout_contains(&output, "-----BEGIN CERTIFICATE-----");
    assert_stdout_contains(&output, "-----END PRIVATE KEY-----");
    assert_stdout_contains(&output, "lines  4");
    assert_output_excludes(&output, "Zm9vYmFy");
}

#[test]
fn test_incomplete_pair_is_not_an_error() {
    let t = Test::new();
    t.write("certs/letsencrypt-server.crt", CERT_PEM);

    let output = t.run(&["certs", "--dir", "certs"]);
    assert_success(&output);
    assert_stderr_contains(&output, "letsencrypt-server.key");
    assert_stderr_contains(&output, "TLS will be disabled");
}

#[test]
fn test_malformed_pair_fails() {
    let t = Test::new();
    t.write("certs/letsencrypt-server.crt", "not pem");
    t.write("certs/letsencrypt-server.key", KEY_PEM);

    let output = t.run(&["certs", "--dir", "certs", "--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid certificate format");
}
