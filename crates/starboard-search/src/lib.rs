// Remote repository search backed by the GitHub REST API.

pub mod error;
pub mod github;
pub mod provider;
pub mod query;

pub use error::SearchError;
pub use github::{GithubClient, GithubConfig};
pub use provider::SearchProvider;
pub use query::{compose_query, SearchQuery, TrendingWindow};
