//! Domain model structs exchanged with the search and persistence providers.
//!
//! Field names follow the domain; `#[serde(rename)]` maps them onto the wire
//! names used by the GitHub REST API and the bookmark table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{BookmarkId, NoteId, RepoId};

// ---------------------------------------------------------------------------
// RepositorySummary
// ---------------------------------------------------------------------------

/// Owner of a repository, as embedded in search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// Public metadata of a repository. Received from the search provider (or
/// synthesized from a bookmark snapshot) and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySummary {
    pub id: RepoId,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(rename = "html_url")]
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub star_count: u64,
    #[serde(rename = "forks_count")]
    pub fork_count: u64,
    #[serde(rename = "open_issues_count", default)]
    pub open_issue_count: u64,
    #[serde(rename = "language")]
    pub primary_language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchPage {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RepositorySummary>,
}

// ---------------------------------------------------------------------------
// Bookmark
// ---------------------------------------------------------------------------

/// A persisted bookmark. Its display fields are a snapshot taken when the
/// bookmark was created and do not follow the live repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub repo_id: RepoId,
    #[serde(rename = "repo_name")]
    pub repo_full_name: String,
    pub repo_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "stars")]
    pub star_count: u64,
    #[serde(rename = "forks")]
    pub fork_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a bookmark; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewBookmark {
    pub repo_id: RepoId,
    #[serde(rename = "repo_name")]
    pub repo_full_name: String,
    pub repo_url: String,
    pub description: String,
    #[serde(rename = "stars")]
    pub star_count: u64,
    #[serde(rename = "forks")]
    pub fork_count: u64,
    pub language: String,
    pub topics: Vec<String>,
}

impl From<&RepositorySummary> for NewBookmark {
    /// Snapshot the displayable fields of `repo`. Missing description and
    /// language become empty strings.
    fn from(repo: &RepositorySummary) -> Self {
        Self {
            repo_id: repo.id,
            repo_full_name: repo.full_name.clone(),
            repo_url: repo.url.clone(),
            description: repo.description.clone().unwrap_or_default(),
            star_count: repo.star_count,
            fork_count: repo.fork_count,
            language: repo.primary_language.clone().unwrap_or_default(),
            topics: repo.topics.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Note
// ---------------------------------------------------------------------------

/// Free-text annotation attached to exactly one bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub bookmark_id: BookmarkId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewNote {
    pub bookmark_id: BookmarkId,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteChanges {
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
