use thiserror::Error;

/// Errors produced by a search provider.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure (connect, timeout, TLS, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },
}

impl SearchError {
    /// Whether the provider rejected the request because of rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status { status: 403 | 429, .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
