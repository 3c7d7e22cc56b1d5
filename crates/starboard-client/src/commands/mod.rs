//! Operations on the [`Controller`](crate::controller::Controller), grouped
//! by domain.
//!
//! Each sub-module adds an `impl Controller` block. Every operation logs its
//! own failures and leaves state untouched when a provider call fails.

pub mod bookmarks;
pub mod notes;
pub mod search;
