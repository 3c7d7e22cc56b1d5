use async_trait::async_trait;

use starboard_shared::SearchPage;

use crate::error::Result;
use crate::query::SearchQuery;

/// A keyword/stars/language repository search service.
///
/// Implementations are expected to be rate-limited and eventually
/// consistent; no pagination cursor is exposed.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;
}
