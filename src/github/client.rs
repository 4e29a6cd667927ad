// GitHub API HTTP client.
// Handles optional authentication, default headers and response status checking.

use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FeedError, Result};

use super::types::RepoKey;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Environment variable holding the optional API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// GitHub API client. Authenticated only when a token is supplied.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a new client against `api_base`, optionally with a bearer token.
    pub fn new(api_base: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| FeedError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("issues-rss/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client, taking the token from GITHUB_TOKEN if it is set.
    pub fn from_env(api_base: &str) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV).ok();
        Self::new(api_base, token.as_deref())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        repo: &RepoKey,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).query(params).send().await?;

        check_response(repo, response)
    }
}

/// Check response status. Every non-success status maps to the same error.
fn check_response(repo: &RepoKey, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .is_some_and(|remaining| remaining == 0);
    if exhausted {
        tracing::warn!("GitHub rate limit exhausted while fetching {}", repo);
    }

    Err(FeedError::AuthOrNotFound {
        repo: repo.to_string(),
        status,
    })
}
