//! GitHub Actions repository secrets.
//!
//! Talks to the REST API with a blocking client:
//!
//! - `GET  /repos/{owner}/{repo}/actions/secrets/public-key`
//! - `GET  /repos/{owner}/{repo}/actions/secrets`
//! - `PUT  /repos/{owner}/{repo}/actions/secrets/{name}`
//! - `DELETE /repos/{owner}/{repo}/actions/secrets/{name}`
//!
//! The token needs admin access to the repository (`repo` scope for classic
//! tokens, "Secrets: write" for fine-grained ones).

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::SecretStore;
use crate::core::cipher::StoreKey;
use crate::core::constants;
use crate::core::repo::Repository;
use crate::error::{Result, StoreError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PAGE_SIZE: usize = 100;

/// Result of checking a token against a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessReport {
    /// Login the token authenticates as
    pub login: String,
    /// Whether the token has admin permission on the repository
    pub admin: bool,
}

/// GitHub repository secret store.
pub struct GitHub {
    client: Client,
    api_url: String,
    repo: Repository,
    key: Option<StoreKey>,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("api_url", &self.api_url)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl GitHub {
    /// Build a client for `repo` authenticating with `token`.
    ///
    /// The API root defaults to `https://api.github.com` and can be pointed at
    /// GitHub Enterprise with `GITHUB_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the HTTP client cannot be built.
    pub fn new(repo: Repository, token: &str) -> Result<Self> {
        let api_url = std::env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| constants::GITHUB_API_URL.to_string());
        Self::with_api_url(repo, token, api_url)
    }

    /// Build a client against an explicit API root.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the HTTP client cannot be built.
    pub fn with_api_url(repo: Repository, token: &str, api_url: impl Into<String>) -> Result<Self> {
        let bearer = Zeroizing::new(format!("Bearer {}", token.trim()));
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|_| StoreError::AuthFailure("token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(constants::GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("secret-relay/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repo,
            key: None,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Check the token and the repository permissions.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AuthFailure` for a rejected token and
    /// `StoreError::RepositoryNotFound` when the repository is not visible.
    pub fn verify(&self) -> Result<AccessReport> {
        let user: Value = self.json(Method::GET, "/user", None)?;
        let login = user
            .get("login")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        let repo: Value = self.json(Method::GET, &self.repo_path(""), None)?;
        let admin = repo
            .pointer("/permissions/admin")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        debug!(login = %login, admin, "token verified");
        Ok(AccessReport { login, admin })
    }

    fn repo_path(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{}", self.repo.owner, self.repo.name, suffix)
    }

    fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let url = format!("{}{}", self.api_url, path);
        trace!(%method, %url, "github request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .map_err(|e| StoreError::Request(format!("{}: {}", url, e)))?;

        check_status(response, &self.repo)
    }

    fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        self.send(method, path, body)?
            .json()
            .map_err(|e| StoreError::InvalidResponse(e.to_string()).into())
    }
}

/// Map HTTP failures onto the store error taxonomy.
fn check_status(response: Response, repo: &Repository) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let err = match status {
        StatusCode::UNAUTHORIZED => StoreError::AuthFailure("invalid or expired token".into()),
        StatusCode::FORBIDDEN => {
            StoreError::AuthFailure(format!("missing permission on {}: {}", repo, body.trim()))
        }
        StatusCode::NOT_FOUND => StoreError::RepositoryNotFound(repo.to_string()),
        _ => StoreError::Request(format!("{} {}", status, body.trim())),
    };
    Err(err.into())
}

#[derive(Debug, Deserialize)]
struct PublicKeyResponse {
    key_id: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct SecretListResponse {
    total_count: usize,
    secrets: Vec<SecretEntry>,
}

#[derive(Debug, Deserialize)]
struct SecretEntry {
    name: String,
}

impl SecretStore for GitHub {
    fn public_key(&mut self) -> Result<StoreKey> {
        if let Some(key) = &self.key {
            return Ok(key.clone());
        }

        let response: PublicKeyResponse =
            self.json(Method::GET, &self.repo_path("/actions/secrets/public-key"), None)?;
        let key = StoreKey::from_base64(response.key_id, &response.key)?;
        debug!(key_id = key.key_id(), "fetched repository public key");

        self.key = Some(key.clone());
        Ok(key)
    }

    fn list(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut page = 1;

        loop {
            let path = self.repo_path(&format!(
                "/actions/secrets?per_page={}&page={}",
                PAGE_SIZE, page
            ));
            let response: SecretListResponse = self.json(Method::GET, &path, None)?;
            let fetched = response.secrets.len();
            names.extend(response.secrets.into_iter().map(|s| s.name));

            if fetched < PAGE_SIZE || names.len() >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!(count = names.len(), "listed repository secrets");
        Ok(names)
    }

    fn put(&mut self, name: &str, sealed: &str, key_id: &str) -> Result<()> {
        let path = self.repo_path(&format!("/actions/secrets/{}", name));
        let body = json!({ "encrypted_value": sealed, "key_id": key_id });

        self.send(Method::PUT, &path, Some(body))?;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let path = self.repo_path(&format!("/actions/secrets/{}", name));
        match self.send(Method::DELETE, &path, None) {
            Ok(_) => Ok(()),
            Err(crate::error::Error::Store(StoreError::RepositoryNotFound(_))) => {
                // A 404 covers both an absent secret and an invisible repository.
                self.send(Method::GET, &self.repo_path(""), None)?;
                debug!(name, "secret already absent");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
