//! HTTP client for the GitHub contents and raw-file endpoints

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::debug;

use tendril_core::{TendrilError, TendrilResult};

use crate::api::Listing;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Repository coordinates for one call
#[derive(Debug, Clone)]
pub struct RepoConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch to read from
    pub branch: String,
}

impl RepoConfig {
    /// Create coordinates for an arbitrary repository
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

impl Default for RepoConfig {
    /// The upstream component registry repository
    fn default() -> Self {
        Self::new("shadcn-ui", "ui", "main")
    }
}

/// HTTP client for GitHub's listing and raw endpoints.
///
/// The bearer token is optional: unauthenticated calls are valid at a lower
/// host-imposed quota. The token sits behind a lock so it can be replaced
/// at runtime without rebuilding the client.
#[derive(Debug)]
pub struct GithubClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Contents API base URL
    api_base: String,
    /// Raw-file endpoint base URL
    raw_base: String,
    /// Optional bearer credential, swappable at runtime
    token: RwLock<Option<String>>,
}

impl GithubClient {
    /// Create a client against the real GitHub endpoints
    pub fn new(token: Option<String>) -> TendrilResult<Self> {
        Self::with_endpoints(DEFAULT_API_BASE, DEFAULT_RAW_BASE, token)
    }

    /// Create a client against custom endpoints (tests point this at a
    /// mock server)
    pub fn with_endpoints(
        api_base: impl Into<String>,
        raw_base: impl Into<String>,
        token: Option<String>,
    ) -> TendrilResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("tendril/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TendrilError::network("Failed to create HTTP client".to_string(), e))?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            raw_base: raw_base.into(),
            token: RwLock::new(token),
        })
    }

    /// Replace (or clear) the bearer credential
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    /// Whether a credential is currently configured
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// List a repository path via the contents endpoint.
    ///
    /// Directory paths yield `Listing::Directory`; a file path yields a
    /// single-object `Listing::File`. Callers discriminate on the shape.
    pub async fn fetch_listing(&self, repo: &RepoConfig, path: &str) -> TendrilResult<Listing> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.repo, path
        );
        debug!(%url, "fetching contents listing");

        let mut request = self
            .client
            .get(&url)
            .query(&[("ref", repo.branch.as_str())])
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = self.token.read().clone() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, body, path));
        }

        response.json::<Listing>().await.map_err(|e| {
            TendrilError::network(format!("Failed to parse listing for '{path}'"), e)
        })
    }

    /// Fetch a file's raw bytes as text from the raw endpoint
    pub async fn fetch_raw(&self, repo: &RepoConfig, path: &str) -> TendrilResult<String> {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, repo.owner, repo.repo, repo.branch, path
        );
        debug!(%url, "fetching raw file");

        let mut request = self.client.get(&url);
        if let Some(token) = self.token.read().clone() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, body, path));
        }

        response
            .text()
            .await
            .map_err(|e| TendrilError::network(format!("Failed to read body of '{path}'"), e))
    }
}

/// Map a non-2xx response to the typed taxonomy
fn map_error_status(status: StatusCode, body: String, resource: &str) -> TendrilError {
    match status {
        StatusCode::NOT_FOUND => TendrilError::not_found(resource),
        StatusCode::UNAUTHORIZED => TendrilError::AuthenticationFailed {
            message: non_empty(body, "bad credentials"),
        },
        StatusCode::FORBIDDEN => {
            // GitHub reports quota exhaustion as 403 with a rate-limit
            // message in the body; the message is passed through verbatim
            if body.to_lowercase().contains("rate limit") {
                TendrilError::RateLimited { message: body }
            } else {
                TendrilError::Forbidden {
                    message: non_empty(body, "permission denied"),
                }
            }
        }
        _ => TendrilError::Remote {
            status: status.as_u16(),
            message: non_empty(body, "unexpected response"),
        },
    }
}

/// Map a connection-level failure (refused, unresolved host, timeout)
fn transport_error(error: reqwest::Error) -> TendrilError {
    let kind = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "transport failure"
    };
    TendrilError::network(format!("{kind}: {error}"), error)
}

fn non_empty(body: String, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
