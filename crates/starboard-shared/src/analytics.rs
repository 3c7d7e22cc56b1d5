//! Aggregate statistics over a loaded set of repositories.

use serde::Serialize;

use crate::constants::{LEADERBOARD_SIZE, TOP_LANGUAGES};
use crate::models::RepositorySummary;
use crate::types::RepoId;

/// Number of repositories using a given primary language.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub repo_id: RepoId,
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RepositoryAnalytics {
    pub total_repositories: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    /// Rounded mean star count; 0 for an empty set.
    pub average_stars: u64,
    pub languages: Vec<LanguageShare>,
    pub top_by_stars: Vec<LeaderboardEntry>,
    pub top_by_forks: Vec<LeaderboardEntry>,
}

impl RepositoryAnalytics {
    pub fn from_repositories(repos: &[RepositorySummary]) -> Self {
        let total_stars: u64 = repos.iter().map(|r| r.star_count).sum();
        let total_forks: u64 = repos.iter().map(|r| r.fork_count).sum();

        let average_stars = if repos.is_empty() {
            0
        } else {
            let n = repos.len() as u64;
            (total_stars + n / 2) / n
        };

        Self {
            total_repositories: repos.len(),
            total_stars,
            total_forks,
            average_stars,
            languages: language_distribution(repos, TOP_LANGUAGES),
            top_by_stars: leaderboard(repos, LEADERBOARD_SIZE, |r| r.star_count),
            top_by_forks: leaderboard(repos, LEADERBOARD_SIZE, |r| r.fork_count),
        }
    }
}

/// Count repositories per primary language, most common first.
///
/// Repositories without a language are skipped. Languages with equal counts
/// keep the order in which they were first seen.
pub fn language_distribution(repos: &[RepositorySummary], limit: usize) -> Vec<LanguageShare> {
    let mut shares: Vec<LanguageShare> = Vec::new();

    for lang in repos
        .iter()
        .filter_map(|r| r.primary_language.as_deref())
        .filter(|l| !l.is_empty())
    {
        match shares.iter_mut().find(|s| s.language == lang) {
            Some(share) => share.count += 1,
            None => shares.push(LanguageShare {
                language: lang.to_string(),
                count: 1,
            }),
        }
    }

    // stable: ties stay in first-seen order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares.truncate(limit);
    shares
}

/// Top `limit` repositories by `metric`, highest first. Ties keep input order.
pub fn leaderboard<F>(repos: &[RepositorySummary], limit: usize, metric: F) -> Vec<LeaderboardEntry>
where
    F: Fn(&RepositorySummary) -> u64,
{
    let mut ranked: Vec<&RepositorySummary> = repos.iter().collect();
    ranked.sort_by_key(|r| std::cmp::Reverse(metric(r)));

    ranked
        .into_iter()
        .take(limit)
        .map(|r| LeaderboardEntry {
            repo_id: r.id,
            name: r.name.clone(),
            value: metric(r),
        })
        .collect()
}
