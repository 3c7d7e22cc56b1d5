//! Application state owned by the [`Controller`](crate::controller::Controller).
//!
//! The state is only ever changed through [`AppState::apply`]; the
//! presentation layer reads clones of it.

use serde::Serialize;

use starboard_shared::{Bookmark, BookmarkId, Note, RepositorySummary, SearchFilters, Tab};

/// The note editor, while open.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NoteEditor {
    /// Repository the note is being written for.
    pub repo: RepositorySummary,
    /// Content of the existing note, or empty.
    pub initial_content: String,
}

/// Central application state.
#[derive(Debug, Clone, Serialize)]
pub struct AppState {
    /// Results of the latest applied search. Replaced wholesale.
    pub repositories: Vec<RepositorySummary>,

    /// Persisted bookmarks, newest first. At most one per `repo_id`.
    pub bookmarks: Vec<Bookmark>,

    /// Persisted notes, newest first. At most one per `bookmark_id`.
    pub notes: Vec<Note>,

    /// Whether the latest scheduled search has not settled yet.
    pub loading: bool,

    pub filters: SearchFilters,

    pub tab: Tab,

    pub note_editor: Option<NoteEditor>,

    /// Generation of the most recently scheduled search. Outcomes tagged
    /// with any other generation are stale.
    pub search_generation: u64,

    #[serde(skip)]
    pub(crate) sync: SyncLog,
}

/// A bookmark or note change the store has confirmed.
#[derive(Debug, Clone)]
pub(crate) enum LocalChange {
    BookmarkCreated(Bookmark),
    BookmarkDeleted(BookmarkId),
    NoteCreated(Note),
    NoteUpdated(Note),
}

/// Confirmed local changes, kept until a list fetched after them replaces
/// the collection they touched.
///
/// A list fetched at epoch `e` may predate any change with a higher epoch;
/// those changes are replayed on top of it.
#[derive(Debug, Clone, Default)]
pub(crate) struct SyncLog {
    pub(crate) epoch: u64,
    pub(crate) bookmarks_synced_at: u64,
    pub(crate) notes_synced_at: u64,
    pub(crate) changes: Vec<(u64, LocalChange)>,
}

impl SyncLog {
    pub(crate) fn record(&mut self, change: LocalChange) {
        self.epoch += 1;
        self.changes.push((self.epoch, change));
    }

    pub(crate) fn since(&self, epoch: u64) -> impl Iterator<Item = &LocalChange> {
        self.changes
            .iter()
            .filter(move |(at, _)| *at > epoch)
            .map(|(_, change)| change)
    }

    /// Drop changes both collections have been reloaded past.
    pub(crate) fn compact(&mut self) {
        let floor = self.bookmarks_synced_at.min(self.notes_synced_at);
        self.changes.retain(|(at, _)| *at > floor);
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            repositories: Vec::new(),
            bookmarks: Vec::new(),
            notes: Vec::new(),
            loading: true,
            filters: SearchFilters::default(),
            tab: Tab::default(),
            note_editor: None,
            search_generation: 0,
            sync: SyncLog::default(),
        }
    }

    /// Marker to tag a bookmark or note list fetch with, taken just before
    /// the fetch is sent.
    pub fn sync_epoch(&self) -> u64 {
        self.sync.epoch
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
