//! In-process [`PersistenceProvider`].
//!
//! Mirrors the hosted store's observable behaviour: identifiers and
//! timestamps are assigned here, lists come back newest first, deletes are
//! idempotent, and no uniqueness constraint is enforced on `repo_id` or
//! `bookmark_id`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use starboard_shared::{Bookmark, BookmarkId, NewBookmark, NewNote, Note, NoteChanges, NoteId, RepoId};

use crate::error::{Result, StoreError};
use crate::provider::PersistenceProvider;

#[derive(Debug, Default)]
struct Tables {
    // Insertion order; the newest row is last.
    bookmarks: Vec<Bookmark>,
    notes: Vec<Note>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookmarks for `repo_id`.
    pub async fn bookmark_count_for(&self, repo_id: RepoId) -> usize {
        let tables = self.tables.read().await;
        tables.bookmarks.iter().filter(|b| b.repo_id == repo_id).count()
    }

    /// Number of stored notes for `bookmark_id`.
    pub async fn note_count_for(&self, bookmark_id: &BookmarkId) -> usize {
        let tables = self.tables.read().await;
        tables
            .notes
            .iter()
            .filter(|n| &n.bookmark_id == bookmark_id)
            .count()
    }
}

#[async_trait]
impl PersistenceProvider for InMemoryStore {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let tables = self.tables.read().await;
        Ok(tables.bookmarks.iter().rev().cloned().collect())
    }

    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark> {
        let created = Bookmark {
            id: BookmarkId(Uuid::new_v4().to_string()),
            repo_id: bookmark.repo_id,
            repo_full_name: bookmark.repo_full_name.clone(),
            repo_url: bookmark.repo_url.clone(),
            description: bookmark.description.clone(),
            star_count: bookmark.star_count,
            fork_count: bookmark.fork_count,
            language: bookmark.language.clone(),
            topics: bookmark.topics.clone(),
            created_at: Utc::now(),
        };

        self.tables.write().await.bookmarks.push(created.clone());
        debug!(bookmark_id = %created.id, repo_id = %created.repo_id, "Stored bookmark");
        Ok(created)
    }

    async fn delete_bookmark(&self, id: &BookmarkId) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.bookmarks.retain(|b| &b.id != id);
        Ok(())
    }

    async fn find_bookmark_by_repo(&self, repo_id: RepoId) -> Result<Option<Bookmark>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookmarks
            .iter()
            .rev()
            .find(|b| b.repo_id == repo_id)
            .cloned())
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        let tables = self.tables.read().await;
        Ok(tables.notes.iter().rev().cloned().collect())
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let now = Utc::now();
        let created = Note {
            id: NoteId(Uuid::new_v4().to_string()),
            bookmark_id: note.bookmark_id.clone(),
            content: note.content.clone(),
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.notes.push(created.clone());
        debug!(note_id = %created.id, bookmark_id = %created.bookmark_id, "Stored note");
        Ok(created)
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note> {
        let mut tables = self.tables.write().await;
        let note = tables
            .notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or(StoreError::NotFound)?;

        note.content = changes.content.clone();
        note.updated_at = changes.updated_at;
        Ok(note.clone())
    }
}
