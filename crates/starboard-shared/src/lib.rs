//! # starboard-shared
//!
//! Domain types shared by the search, store and client crates: repository
//! summaries, bookmarks, notes, search filters and the analytics computed
//! over a loaded result set.

pub mod analytics;
pub mod constants;
pub mod error;
pub mod models;
pub mod types;

pub use error::ParseError;
pub use models::*;
pub use types::*;
