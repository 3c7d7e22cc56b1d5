//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client can start against the public
//! GitHub API without any configuration; the persistence endpoint must be
//! supplied for bookmarks and notes to work.

use std::time::Duration;

use starboard_search::GithubConfig;
use starboard_shared::constants::{GITHUB_API_BASE, SEARCH_DEBOUNCE_MS, SEARCH_PAGE_SIZE};
use starboard_store::RestConfig;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitHub REST API base URL.
    /// Env: `GITHUB_API_URL`
    /// Default: `https://api.github.com`
    pub github_api_url: String,

    /// Optional GitHub token, sent as a bearer token.
    /// Env: `GITHUB_TOKEN`
    pub github_token: Option<String>,

    /// Hosted store project URL.
    /// Env: `SUPABASE_URL`
    pub store_url: String,

    /// Hosted store anonymous API key.
    /// Env: `SUPABASE_ANON_KEY`
    pub store_api_key: String,

    /// Quiet period before a filter change issues a search.
    /// Env: `SEARCH_DEBOUNCE_MS`
    /// Default: `500`
    pub search_debounce: Duration,

    /// Results requested per search.
    /// Env: `SEARCH_PAGE_SIZE`
    /// Default: `30`
    pub search_page_size: u32,

    /// Re-read a freshly created bookmark from the store before attaching
    /// a note to it, instead of using the create response.
    /// Env: `VERIFY_BOOKMARK_WRITES` (true/false)
    /// Default: `false`
    pub verify_bookmark_writes: bool,

    /// Per-request timeout for both providers.
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            github_api_url: GITHUB_API_BASE.to_string(),
            github_token: None,
            store_url: String::new(),
            store_api_key: String::new(),
            search_debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            search_page_size: SEARCH_PAGE_SIZE,
            verify_bookmark_writes: false,
            http_timeout: Duration::from_secs(15),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("GITHUB_API_URL") {
            config.github_api_url = url;
        }

        if let Some(token) = lookup("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.github_token = Some(token);
            }
        }

        if let Some(url) = lookup("SUPABASE_URL") {
            config.store_url = url.trim().to_string();
        }

        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            config.store_api_key = key;
        }

        if let Some(val) = lookup("SEARCH_DEBOUNCE_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.search_debounce = Duration::from_millis(ms),
                Err(_) => tracing::warn!(value = %val, "Invalid SEARCH_DEBOUNCE_MS, using default"),
            }
        }

        if let Some(val) = lookup("SEARCH_PAGE_SIZE") {
            match val.parse::<u32>() {
                Ok(n) if (1..=100).contains(&n) => config.search_page_size = n,
                _ => tracing::warn!(value = %val, "Invalid SEARCH_PAGE_SIZE, using default"),
            }
        }

        if let Some(val) = lookup("VERIFY_BOOKMARK_WRITES") {
            config.verify_bookmark_writes = val == "true" || val == "1";
        }

        if !config.has_store() {
            tracing::warn!("SUPABASE_URL is not set, bookmark and note requests will fail");
        }

        config
    }

    /// Whether a persistence endpoint is configured.
    pub fn has_store(&self) -> bool {
        !self.store_url.is_empty()
    }

    pub fn github(&self) -> GithubConfig {
        GithubConfig {
            base_url: self.github_api_url.clone(),
            token: self.github_token.clone(),
            timeout: self.http_timeout,
        }
    }

    pub fn store(&self) -> RestConfig {
        RestConfig {
            url: self.store_url.clone(),
            api_key: self.store_api_key.clone(),
            timeout: self.http_timeout,
        }
    }
}
