//! Pure derivations over [`AppState`].
//!
//! Nothing here touches a provider; the same input always yields the same
//! output.

use starboard_shared::analytics::RepositoryAnalytics;
use starboard_shared::constants::AVATAR_BASE;
use starboard_shared::{Bookmark, Note, Owner, RepoId, RepositorySummary, Tab};

use crate::state::AppState;

pub fn find_bookmark(bookmarks: &[Bookmark], repo_id: RepoId) -> Option<&Bookmark> {
    bookmarks.iter().find(|b| b.repo_id == repo_id)
}

pub fn find_note_for_bookmark<'a>(notes: &'a [Note], bookmark: &Bookmark) -> Option<&'a Note> {
    notes.iter().find(|n| n.bookmark_id == bookmark.id)
}

pub fn is_bookmarked(bookmarks: &[Bookmark], repo_id: RepoId) -> bool {
    find_bookmark(bookmarks, repo_id).is_some()
}

/// Content to prefill the note editor with: the note attached to the
/// repository's bookmark, or empty when either is missing.
pub fn note_initial_content(bookmarks: &[Bookmark], notes: &[Note], repo_id: RepoId) -> String {
    find_bookmark(bookmarks, repo_id)
        .and_then(|bookmark| find_note_for_bookmark(notes, bookmark))
        .map(|note| note.content.clone())
        .unwrap_or_default()
}

/// Rebuild a repository summary from a bookmark snapshot.
pub fn bookmark_to_summary(bookmark: &Bookmark) -> RepositorySummary {
    let mut parts = bookmark.repo_full_name.split('/');
    let login = parts.next().unwrap_or_default().to_string();
    let name = parts.next().unwrap_or_default().to_string();

    RepositorySummary {
        id: bookmark.repo_id,
        name,
        full_name: bookmark.repo_full_name.clone(),
        owner: Owner {
            avatar_url: format!("{AVATAR_BASE}/{login}.png"),
            login,
        },
        url: bookmark.repo_url.clone(),
        description: non_empty(&bookmark.description),
        star_count: bookmark.star_count,
        fork_count: bookmark.fork_count,
        open_issue_count: 0,
        primary_language: non_empty(&bookmark.language),
        topics: bookmark.topics.clone(),
        // The snapshot does not know the live repository's update time.
        updated_at: bookmark.created_at,
        created_at: bookmark.created_at,
    }
}

/// The bookmarks tab's list, in bookmark order.
pub fn bookmarked_view(bookmarks: &[Bookmark]) -> Vec<RepositorySummary> {
    bookmarks.iter().map(bookmark_to_summary).collect()
}

/// What the repository list currently shows.
pub fn displayed_repositories(state: &AppState) -> Vec<RepositorySummary> {
    match state.tab {
        Tab::Bookmarks => bookmarked_view(&state.bookmarks),
        Tab::Trending | Tab::Analytics => state.repositories.clone(),
    }
}

/// Aggregates over the current search results.
pub fn analytics(state: &AppState) -> RepositoryAnalytics {
    RepositoryAnalytics::from_repositories(&state.repositories)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
