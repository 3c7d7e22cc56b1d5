/// Application name
pub const APP_NAME: &str = "starboard";

/// Default GitHub REST API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Media type requested from the GitHub REST API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Popularity floor applied to every repository search
pub const SEARCH_STARS_FLOOR: &str = "stars:>1000";

/// Popularity floor applied to trending searches
pub const TRENDING_STARS_FLOOR: &str = "stars:>100";

/// Fixed page size for repository searches
pub const SEARCH_PAGE_SIZE: u32 = 30;

/// Quiet period before a changed filter issues a search (milliseconds)
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Label of the language filter that disables the `language:` clause
pub const ALL_LANGUAGES: &str = "All languages";

/// Language presets offered by the search bar
pub const LANGUAGE_PRESETS: &[&str] = &[
    ALL_LANGUAGES,
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "Go",
    "Rust",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
];

/// Base URL used to synthesize owner avatars (`<base>/<login>.png`)
pub const AVATAR_BASE: &str = "https://github.com";

/// Persisted table names
pub const BOOKMARKS_TABLE: &str = "bookmarks";
pub const NOTES_TABLE: &str = "notes";

/// Analytics cut-offs
pub const TOP_LANGUAGES: usize = 8;
pub const LEADERBOARD_SIZE: usize = 10;
