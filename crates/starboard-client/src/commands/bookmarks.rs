//! Bookmark toggling.
//!
//! Membership is decided from local state. The provider is called first and
//! local state only changes once it confirms.

use serde::Serialize;
use tracing::{info, warn};

use starboard_shared::{Bookmark, BookmarkId, NewBookmark, RepoId, RepositorySummary};

use crate::controller::Controller;
use crate::error::Result;
use crate::guard::MutationPermit;
use crate::reducer::Action;
use crate::view;

/// What a toggle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum BookmarkToggle {
    Added(Bookmark),
    Removed(BookmarkId),
}

impl Controller {
    pub async fn load_bookmarks(&self) -> Result<()> {
        let since = self.read(|s| s.sync_epoch());
        let bookmarks = self.inner.store.list_bookmarks().await.map_err(|e| {
            warn!(error = %e, "Failed to load bookmarks");
            e
        })?;
        self.apply(Action::BookmarksLoaded { since, bookmarks });
        Ok(())
    }

    /// Bookmark `repo`, or remove its bookmark if it already has one.
    pub async fn toggle_bookmark(&self, repo: &RepositorySummary) -> Result<BookmarkToggle> {
        let permit = self.acquire(repo.id)?;

        let existing = self.read(|s| view::find_bookmark(&s.bookmarks, repo.id).map(|b| b.id.clone()));
        match existing {
            Some(bookmark_id) => {
                self.inner.store.delete_bookmark(&bookmark_id).await.map_err(|e| {
                    warn!(repo_id = %repo.id, %bookmark_id, error = %e, "Failed to remove bookmark");
                    e
                })?;
                self.apply(Action::BookmarkDeleted(bookmark_id.clone()));
                info!(repo_id = %repo.id, %bookmark_id, "Bookmark removed");
                Ok(BookmarkToggle::Removed(bookmark_id))
            }
            None => {
                let bookmark = self.create_bookmark(repo, &permit).await?;
                Ok(BookmarkToggle::Added(bookmark))
            }
        }
    }

    /// Create a bookmark for `repo`. Callers must hold the repository's permit.
    pub(crate) async fn create_bookmark(
        &self,
        repo: &RepositorySummary,
        permit: &MutationPermit,
    ) -> Result<Bookmark> {
        debug_assert_eq!(permit.repo_id(), repo.id);

        let new = NewBookmark::from(repo);
        let bookmark = self.inner.store.create_bookmark(&new).await.map_err(|e| {
            warn!(repo_id = %repo.id, error = %e, "Failed to create bookmark");
            e
        })?;

        self.apply(Action::BookmarkCreated(bookmark.clone()));
        info!(repo_id = %repo.id, bookmark_id = %bookmark.id, "Bookmark added");
        Ok(bookmark)
    }

    /// The bookmarks tab's repository list.
    pub fn bookmarked_repositories(&self) -> Vec<RepositorySummary> {
        self.read(|s| view::bookmarked_view(&s.bookmarks))
    }

    pub fn is_bookmarked(&self, repo_id: RepoId) -> bool {
        self.read(|s| view::is_bookmarked(&s.bookmarks, repo_id))
    }
}
