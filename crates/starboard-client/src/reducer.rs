//! State transitions.
//!
//! Every change to [`AppState`] goes through [`AppState::apply`], which does
//! no I/O and returns the events describing what changed. Provider calls
//! happen in the controller; only their settled outcomes become actions.

use std::collections::HashSet;

use tracing::{debug, warn};

use starboard_shared::{Bookmark, BookmarkId, Note, RepositorySummary, SearchFilters, Tab};

use crate::events::StateEvent;
use crate::state::{AppState, LocalChange, NoteEditor};
use crate::view;

#[derive(Debug, Clone)]
pub enum Action {
    FiltersChanged(SearchFilters),
    /// A new search was scheduled; supersedes every earlier generation.
    SearchScheduled,
    SearchStarted {
        generation: u64,
    },
    SearchSucceeded {
        generation: u64,
        repositories: Vec<RepositorySummary>,
    },
    SearchFailed {
        generation: u64,
    },
    /// A full bookmark list, fetched when the sync epoch was `since`.
    BookmarksLoaded {
        since: u64,
        bookmarks: Vec<Bookmark>,
    },
    /// A full note list, fetched when the sync epoch was `since`.
    NotesLoaded {
        since: u64,
        notes: Vec<Note>,
    },
    BookmarkCreated(Bookmark),
    BookmarkDeleted(BookmarkId),
    NoteCreated(Note),
    NoteUpdated(Note),
    TabSelected(Tab),
    NoteEditorOpened(RepositorySummary),
    NoteEditorClosed,
}

impl AppState {
    pub fn apply(&mut self, action: Action) -> Vec<StateEvent> {
        match action {
            Action::FiltersChanged(filters) => {
                if self.filters == filters {
                    return Vec::new();
                }
                self.filters = filters;
                vec![StateEvent::FiltersChanged]
            }

            Action::SearchScheduled => {
                self.search_generation = self.search_generation.wrapping_add(1);
                Vec::new()
            }

            Action::SearchStarted { generation } => {
                if generation != self.search_generation || self.loading {
                    return Vec::new();
                }
                self.loading = true;
                vec![StateEvent::LoadingChanged(true)]
            }

            Action::SearchSucceeded {
                generation,
                repositories,
            } => {
                if generation != self.search_generation {
                    debug!(
                        generation,
                        current = self.search_generation,
                        "Discarding stale search results"
                    );
                    return Vec::new();
                }
                self.repositories = repositories;
                let mut events = vec![StateEvent::RepositoriesChanged];
                events.extend(self.finish_loading());
                events
            }

            Action::SearchFailed { generation } => {
                if generation != self.search_generation {
                    return Vec::new();
                }
                self.finish_loading()
            }

            Action::BookmarksLoaded { since, bookmarks } => {
                if since < self.sync.bookmarks_synced_at {
                    debug!(since, "Discarding bookmark list superseded by a newer one");
                    return Vec::new();
                }
                let mut merged = dedupe_bookmarks(bookmarks);
                for change in self.sync.since(since) {
                    match change {
                        LocalChange::BookmarkCreated(b) => insert_bookmark(&mut merged, b.clone()),
                        LocalChange::BookmarkDeleted(id) => {
                            remove_bookmark(&mut merged, id);
                        }
                        LocalChange::NoteCreated(_) | LocalChange::NoteUpdated(_) => {}
                    }
                }
                self.bookmarks = merged;
                self.sync.bookmarks_synced_at = since;
                self.sync.compact();
                vec![StateEvent::BookmarksChanged]
            }

            Action::NotesLoaded { since, notes } => {
                if since < self.sync.notes_synced_at {
                    debug!(since, "Discarding note list superseded by a newer one");
                    return Vec::new();
                }
                let mut merged = dedupe_notes(notes);
                for change in self.sync.since(since) {
                    match change {
                        LocalChange::NoteCreated(n) => insert_note(&mut merged, n.clone()),
                        LocalChange::NoteUpdated(n) => update_note(&mut merged, n.clone()),
                        LocalChange::BookmarkCreated(_) | LocalChange::BookmarkDeleted(_) => {}
                    }
                }
                self.notes = merged;
                self.sync.notes_synced_at = since;
                self.sync.compact();
                vec![StateEvent::NotesChanged]
            }

            Action::BookmarkCreated(bookmark) => {
                self.sync.record(LocalChange::BookmarkCreated(bookmark.clone()));
                insert_bookmark(&mut self.bookmarks, bookmark);
                vec![StateEvent::BookmarksChanged]
            }

            Action::BookmarkDeleted(id) => {
                self.sync.record(LocalChange::BookmarkDeleted(id.clone()));
                if !remove_bookmark(&mut self.bookmarks, &id) {
                    return Vec::new();
                }
                vec![StateEvent::BookmarksChanged]
            }

            Action::NoteCreated(note) => {
                self.sync.record(LocalChange::NoteCreated(note.clone()));
                insert_note(&mut self.notes, note);
                vec![StateEvent::NotesChanged]
            }

            Action::NoteUpdated(note) => {
                self.sync.record(LocalChange::NoteUpdated(note.clone()));
                update_note(&mut self.notes, note);
                vec![StateEvent::NotesChanged]
            }

            Action::TabSelected(tab) => {
                if self.tab == tab {
                    return Vec::new();
                }
                self.tab = tab;
                vec![StateEvent::TabChanged]
            }

            Action::NoteEditorOpened(repo) => {
                let initial_content = view::note_initial_content(&self.bookmarks, &self.notes, repo.id);
                self.note_editor = Some(NoteEditor {
                    repo,
                    initial_content,
                });
                vec![StateEvent::NoteEditorChanged]
            }

            Action::NoteEditorClosed => {
                if self.note_editor.take().is_none() {
                    return Vec::new();
                }
                vec![StateEvent::NoteEditorChanged]
            }
        }
    }

    fn finish_loading(&mut self) -> Vec<StateEvent> {
        if !self.loading {
            return Vec::new();
        }
        self.loading = false;
        vec![StateEvent::LoadingChanged(false)]
    }
}

/// Prepend `bookmark`, replacing any entry for the same repository.
fn insert_bookmark(bookmarks: &mut Vec<Bookmark>, bookmark: Bookmark) {
    bookmarks.retain(|b| b.repo_id != bookmark.repo_id);
    bookmarks.insert(0, bookmark);
}

fn remove_bookmark(bookmarks: &mut Vec<Bookmark>, id: &BookmarkId) -> bool {
    let before = bookmarks.len();
    bookmarks.retain(|b| &b.id != id);
    bookmarks.len() != before
}

/// Prepend `note`, replacing any note on the same bookmark.
fn insert_note(notes: &mut Vec<Note>, note: Note) {
    notes.retain(|n| n.bookmark_id != note.bookmark_id);
    notes.insert(0, note);
}

/// Replace the note with the same id in place, or insert it if absent.
fn update_note(notes: &mut Vec<Note>, note: Note) {
    let position = notes.iter().position(|n| n.id == note.id);
    match position {
        Some(i) => notes[i] = note,
        None => insert_note(notes, note),
    }
}

/// Keep the first (newest) bookmark for each repository.
fn dedupe_bookmarks(bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen = HashSet::new();
    let total = bookmarks.len();
    let unique: Vec<Bookmark> = bookmarks
        .into_iter()
        .filter(|b| seen.insert(b.repo_id))
        .collect();
    if unique.len() != total {
        warn!(dropped = total - unique.len(), "Store returned duplicate bookmarks");
    }
    unique
}

/// Keep the first (newest) note for each bookmark.
fn dedupe_notes(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    let total = notes.len();
    let unique: Vec<Note> = notes
        .into_iter()
        .filter(|n| seen.insert(n.bookmark_id.clone()))
        .collect();
    if unique.len() != total {
        warn!(dropped = total - unique.len(), "Store returned duplicate notes");
    }
    unique
}
