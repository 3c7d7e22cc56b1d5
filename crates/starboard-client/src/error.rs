use thiserror::Error;

use starboard_search::SearchError;
use starboard_shared::RepoId;
use starboard_store::StoreError;

/// Errors produced by the reconciliation core.
///
/// None of these are fatal: every failing operation leaves local state as
/// it was at the point of failure.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Another bookmark or note change for this repository has not settled.
    #[error("A change for repository {0} is already in flight")]
    MutationInFlight(RepoId),

    /// The bookmark just created could not be read back from the store.
    #[error("Bookmark for repository {0} not found after creation")]
    BookmarkMissing(RepoId),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
