use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ALL_LANGUAGES;
use crate::error::ParseError;

/// GitHub repository identifier, as assigned by the search provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RepoId(pub u64);

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned bookmark identifier. Opaque to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BookmarkId(pub String);

impl BookmarkId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookmarkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Server-assigned note identifier. Opaque to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Stars,
    Forks,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Updated => "updated",
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stars" => Ok(Self::Stars),
            "forks" => Ok(Self::Forks),
            "updated" => Ok(Self::Updated),
            other => Err(ParseError::SortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseError::SortOrder(other.to_string())),
        }
    }
}

/// Language restriction applied to a search.
///
/// The search bar presents "All languages" as a regular choice; it maps to
/// [`LanguageFilter::All`] and contributes no `language:` clause.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum LanguageFilter {
    #[default]
    All,
    Only(String),
}

impl LanguageFilter {
    /// Build a filter from the label shown in the language picker.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == ALL_LANGUAGES {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LANGUAGES,
            Self::Only(lang) => lang,
        }
    }

    /// The language to put in a `language:` qualifier, if any.
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(lang) => Some(lang),
        }
    }
}

impl From<String> for LanguageFilter {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<LanguageFilter> for String {
    fn from(filter: LanguageFilter) -> Self {
        filter.label().to_string()
    }
}

/// Top-level view of the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Trending,
    Bookmarks,
    Analytics,
}

/// The user-controlled inputs that drive a repository search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    /// Free-text search term (may be empty).
    pub query: String,
    pub language: LanguageFilter,
    pub sort: SortKey,
    pub order: SortOrder,
}
