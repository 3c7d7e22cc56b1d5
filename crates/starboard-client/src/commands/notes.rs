//! Note upsert and the note editor.
//!
//! Saving a note for a repository that has no bookmark creates the bookmark
//! first. The whole save holds one mutation permit, so it cannot interleave
//! with a toggle or another save for the same repository.

use chrono::Utc;
use tracing::{debug, info, warn};

use starboard_shared::{BookmarkId, NewNote, Note, NoteChanges, RepoId, RepositorySummary};

use crate::controller::Controller;
use crate::error::{ClientError, Result};
use crate::guard::MutationPermit;
use crate::reducer::Action;
use crate::view;

impl Controller {
    pub async fn load_notes(&self) -> Result<()> {
        let since = self.read(|s| s.sync_epoch());
        let notes = self.inner.store.list_notes().await.map_err(|e| {
            warn!(error = %e, "Failed to load notes");
            e
        })?;
        self.apply(Action::NotesLoaded { since, notes });
        Ok(())
    }

    /// Current note text for a repository, or empty.
    pub fn note_content_for(&self, repo_id: RepoId) -> String {
        self.read(|s| view::note_initial_content(&s.bookmarks, &s.notes, repo_id))
    }

    pub fn open_note_editor(&self, repo: RepositorySummary) {
        self.apply(Action::NoteEditorOpened(repo));
    }

    pub fn close_note_editor(&self) {
        self.apply(Action::NoteEditorClosed);
    }

    /// Create or update the note attached to `repo`'s bookmark.
    pub async fn save_note(&self, repo: &RepositorySummary, content: &str) -> Result<Note> {
        let permit = self.acquire(repo.id)?;
        let bookmark_id = self.ensure_bookmark(repo, &permit).await?;

        let existing = self.read(|s| {
            s.notes
                .iter()
                .find(|n| n.bookmark_id == bookmark_id)
                .map(|n| n.id.clone())
        });

        match existing {
            Some(note_id) => {
                let changes = NoteChanges {
                    content: content.to_string(),
                    updated_at: Utc::now(),
                };
                let note = self
                    .inner
                    .store
                    .update_note(&note_id, &changes)
                    .await
                    .map_err(|e| {
                        warn!(repo_id = %repo.id, %note_id, error = %e, "Failed to update note");
                        e
                    })?;
                self.apply(Action::NoteUpdated(note.clone()));
                info!(repo_id = %repo.id, %note_id, "Note updated");
                Ok(note)
            }
            None => {
                let new = NewNote {
                    bookmark_id,
                    content: content.to_string(),
                };
                let note = self.inner.store.create_note(&new).await.map_err(|e| {
                    warn!(repo_id = %repo.id, bookmark_id = %new.bookmark_id, error = %e, "Failed to create note");
                    e
                })?;
                self.apply(Action::NoteCreated(note.clone()));
                info!(repo_id = %repo.id, note_id = %note.id, "Note created");
                Ok(note)
            }
        }
    }

    /// Save against the open editor's repository, then close the editor.
    ///
    /// The editor closes whether or not the save went through, unless it was
    /// reopened for another repository meanwhile. Returns `Ok(None)` when no
    /// editor is open.
    pub async fn save_note_from_editor(&self, content: &str) -> Result<Option<Note>> {
        let Some(repo) = self.read(|s| s.note_editor.as_ref().map(|e| e.repo.clone())) else {
            debug!("Save requested with no note editor open");
            return Ok(None);
        };

        let saved = self.save_note(&repo, content).await;
        self.close_note_editor_for(repo.id);
        saved.map(Some)
    }

    /// Close the editor only if it is still open for `repo_id`.
    fn close_note_editor_for(&self, repo_id: RepoId) {
        let events = {
            let mut state = self.lock_state();
            let same_repo = state
                .note_editor
                .as_ref()
                .is_some_and(|editor| editor.repo.id == repo_id);
            if same_repo {
                state.apply(Action::NoteEditorClosed)
            } else {
                debug!(%repo_id, "Note editor moved on during save, leaving it open");
                Vec::new()
            }
        };
        self.emit(events);
    }

    /// Id of `repo`'s bookmark, creating the bookmark if needed.
    async fn ensure_bookmark(
        &self,
        repo: &RepositorySummary,
        permit: &MutationPermit,
    ) -> Result<BookmarkId> {
        let local = self.read(|s| view::find_bookmark(&s.bookmarks, repo.id).map(|b| b.id.clone()));
        if let Some(id) = local {
            return Ok(id);
        }

        let created = self.create_bookmark(repo, permit).await?;
        if !self.inner.config.verify_bookmark_writes {
            return Ok(created.id);
        }

        // Read back through the store before attaching anything to it.
        match self.inner.store.find_bookmark_by_repo(repo.id).await {
            Ok(Some(bookmark)) => Ok(bookmark.id),
            Ok(None) => {
                warn!(repo_id = %repo.id, "Created bookmark not visible yet, note not saved");
                Err(ClientError::BookmarkMissing(repo.id))
            }
            Err(e) => {
                warn!(repo_id = %repo.id, error = %e, "Bookmark read-back failed, note not saved");
                Err(ClientError::BookmarkMissing(repo.id))
            }
        }
    }
}
