//! Optional TLS certificate pair.
//!
//! A certificate directory may hold `letsencrypt-server.crt` and
//! `letsencrypt-server.key`. Both must be present for TLS to be configured;
//! a missing file means TLS is disabled downstream, never an error.
//!
//! Only header markers are checked. Anything deeper (chain order, key match,
//! expiry) is left to the server that loads the pair.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::domain::Secret;
use crate::error::{CertError, Result};

const CERT_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const CERT_END: &str = "-----END CERTIFICATE-----";

/// Outcome of loading the certificate directory.
#[derive(Debug)]
pub enum CertificateSet {
    /// Both files present and well-formed.
    Enabled(CertificatePair),
    /// At least one file missing.
    Disabled { missing: Vec<PathBuf> },
}

/// A PEM certificate and private key.
pub struct CertificatePair {
    cert: Zeroizing<String>,
    key: Zeroizing<String>,
}

impl std::fmt::Debug for CertificatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificatePair")
            .field("cert_len", &self.cert.len())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl CertificatePair {
    pub fn cert(&self) -> &str {
        &self.cert
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The pair as auto-derived store secrets.
    pub fn secrets(&self) -> Vec<Secret> {
        vec![
            Secret::auto(constants::CERT_SECRET, self.cert.as_str()),
            Secret::auto(constants::KEY_SECRET, self.key.as_str()),
        ]
    }
}

impl CertificateSet {
    /// Load the pair from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `CertError::InvalidCertificateFormat` when both files exist but
    /// either is not text or lacks its PEM markers, and `CertError::Read` on
    /// I/O failure.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let cert_path = dir.join(constants::CERT_FILE);
        let key_path = dir.join(constants::KEY_FILE);
        debug!(dir = %dir.display(), "loading certificate pair");

        let missing: Vec<PathBuf> = [&cert_path, &key_path]
            .into_iter()
            .filter(|p| !p.is_file())
            .cloned()
            .collect();
        if !missing.is_empty() {
            info!(missing = missing.len(), "certificate pair incomplete, TLS disabled");
            return Ok(CertificateSet::Disabled { missing });
        }

        let cert = read_pem(&cert_path)?;
        let key = read_pem(&key_path)?;

        validate_cert(&cert, &cert_path)?;
        validate_key(&key, &key_path)?;

        debug!(cert_len = cert.len(), key_len = key.len(), "certificate pair loaded");
        Ok(CertificateSet::Enabled(CertificatePair { cert, key }))
    }

    /// Whether downstream consumers should enable TLS.
    pub fn tls_enabled(&self) -> bool {
        matches!(self, CertificateSet::Enabled(_))
    }

    pub fn pair(&self) -> Option<&CertificatePair> {
        match self {
            CertificateSet::Enabled(pair) => Some(pair),
            CertificateSet::Disabled { .. } => None,
        }
    }
}

/// Read a PEM file as trimmed text; binary content is a format error.
fn read_pem(path: &Path) -> Result<Zeroizing<String>> {
    let bytes = std::fs::read(path).map_err(CertError::Read)?;
    let text = String::from_utf8(bytes).map_err(|_| invalid(path, "not PEM text"))?;
    let text = Zeroizing::new(text);
    Ok(Zeroizing::new(text.trim().to_string()))
}

fn invalid(path: &Path, reason: &str) -> crate::error::Error {
    CertError::InvalidCertificateFormat {
        file: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn validate_cert(content: &str, path: &Path) -> Result<()> {
    let Some(begin) = content.find(CERT_BEGIN) else {
        return Err(invalid(path, "missing BEGIN CERTIFICATE marker"));
    };
    match content.rfind(CERT_END) {
        Some(end) if end > begin => Ok(()),
        _ => Err(invalid(path, "missing END CERTIFICATE marker")),
    }
}

/// Accepts PKCS#8 (`PRIVATE KEY`), PKCS#1 (`RSA PRIVATE KEY`) and SEC1
/// (`EC PRIVATE KEY`) labels.
fn validate_key(content: &str, path: &Path) -> Result<()> {
    let begin = content
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("-----BEGIN ") && l.ends_with("PRIVATE KEY-----"));
    let Some(begin) = begin else {
        return Err(invalid(path, "missing BEGIN PRIVATE KEY marker"));
    };

    let expected_end = begin.replacen("BEGIN", "END", 1);
    if content.lines().map(str::trim).any(|l| l == expected_end) {
        Ok(())
    } else {
        Err(invalid(path, "missing matching END PRIVATE KEY marker"))
    }
}
