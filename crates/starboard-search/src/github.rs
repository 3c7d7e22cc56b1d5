//! GitHub REST API client.
//!
//! Implements [`SearchProvider`] on top of `GET /search/repositories` and
//! exposes the single-repository lookup used for detail views.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use starboard_shared::constants::{APP_NAME, GITHUB_ACCEPT, GITHUB_API_BASE};
use starboard_shared::{RepositorySummary, SearchPage};

use crate::error::{Result, SearchError};
use crate::provider::SearchProvider;
use crate::query::SearchQuery;

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Optional personal access token; raises the rate limit when set.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: GITHUB_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Error body returned by the GitHub API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        // GitHub rejects requests without a User-Agent.
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    /// Fetch a single repository by owner and name.
    pub async fn repository(&self, owner: &str, name: &str) -> Result<RepositorySummary> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, name);
        let resp = self.get(&url).send().await?;
        read_json(resp).await
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let req = self.http.get(url).header(ACCEPT, GITHUB_ACCEPT);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl SearchProvider for GithubClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let url = format!("{}/search/repositories", self.base_url);

        debug!(q = %query.q, sort = query.sort.as_str(), order = query.order.as_str(), "Searching repositories");

        let resp = self.get(&url).query(&query.params()).send().await?;
        let page: SearchPage = read_json(resp).await?;

        debug!(
            total = page.total_count,
            returned = page.items.len(),
            "Search completed"
        );

        Ok(page)
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = match resp.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        return Err(SearchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(resp.json::<T>().await?)
}
