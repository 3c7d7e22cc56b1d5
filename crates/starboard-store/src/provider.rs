use async_trait::async_trait;

use starboard_shared::{Bookmark, BookmarkId, NewBookmark, NewNote, Note, NoteChanges, NoteId, RepoId};

use crate::error::Result;

/// A store holding two related collections: bookmarks and the notes
/// attached to them. Identifiers and timestamps are assigned by the store.
#[async_trait]
pub trait PersistenceProvider: Send + Sync {
    /// All bookmarks, newest first.
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>>;

    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark>;

    async fn delete_bookmark(&self, id: &BookmarkId) -> Result<()>;

    /// Bookmark for `repo_id`, if one exists.
    async fn find_bookmark_by_repo(&self, repo_id: RepoId) -> Result<Option<Bookmark>>;

    /// All notes, newest first.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    async fn create_note(&self, note: &NewNote) -> Result<Note>;

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note>;
}
