//! Search query construction.
//!
//! Every repository search carries a popularity floor. The free-text term
//! and an optional `language:` qualifier are ANDed in front of and after it:
//! `<text> stars:>1000 language:<lang>`.

use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use starboard_shared::constants::{SEARCH_PAGE_SIZE, SEARCH_STARS_FLOOR, TRENDING_STARS_FLOOR};
use starboard_shared::{LanguageFilter, SearchFilters, SortKey, SortOrder};

/// A fully composed search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Composed query string (`q` parameter).
    pub q: String,
    pub sort: SortKey,
    pub order: SortOrder,
    pub per_page: u32,
}

impl SearchQuery {
    pub fn from_filters(filters: &SearchFilters, per_page: u32) -> Self {
        Self {
            q: compose_query(&filters.query, &filters.language),
            sort: filters.sort,
            order: filters.order,
            per_page,
        }
    }

    /// Repositories created within `window` before `today`, most starred first.
    pub fn trending(window: TrendingWindow, language: &LanguageFilter, today: NaiveDate) -> Self {
        let mut q = format!(
            "created:>{} {}",
            window.since(today).format("%Y-%m-%d"),
            TRENDING_STARS_FLOOR
        );
        if let Some(lang) = language.language() {
            q.push_str(" language:");
            q.push_str(lang);
        }

        Self {
            q,
            sort: SortKey::Stars,
            order: SortOrder::Desc,
            per_page: SEARCH_PAGE_SIZE,
        }
    }

    /// Query-string parameters in the order the search endpoint expects them.
    pub fn params(&self) -> [(&'static str, String); 4] {
        [
            ("q", self.q.clone()),
            ("sort", self.sort.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Compose the `q` string for a free-text term and language filter.
pub fn compose_query(text: &str, language: &LanguageFilter) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    let text = text.trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }
    parts.push(SEARCH_STARS_FLOOR.to_string());
    if let Some(lang) = language.language() {
        parts.push(format!("language:{lang}"));
    }

    parts.join(" ")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingWindow {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TrendingWindow {
    /// First day (exclusive) of the window ending at `today`.
    pub fn since(self, today: NaiveDate) -> NaiveDate {
        let earlier = match self {
            Self::Daily => today.checked_sub_days(Days::new(1)),
            Self::Weekly => today.checked_sub_days(Days::new(7)),
            Self::Monthly => today.checked_sub_months(Months::new(1)),
        };
        earlier.unwrap_or(today)
    }
}
