//! # starboard-client
//!
//! Reconciles live repository search results with persisted bookmarks and
//! notes. A [`Controller`] owns the [`AppState`], turns user [`Intent`]s into
//! provider calls, and applies the settled outcomes through the reducer in
//! [`reducer`].

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod guard;
pub mod reducer;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;

use tracing_subscriber::{fmt, EnvFilter};

pub use commands::bookmarks::BookmarkToggle;
pub use config::ClientConfig;
pub use controller::{Controller, Intent};
pub use error::{ClientError, Result};
pub use events::StateEvent;
pub use reducer::Action;
pub use state::{AppState, NoteEditor};

/// Install a `fmt` subscriber filtered by `RUST_LOG`, with sensible defaults.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("starboard_client=debug,starboard_search=info,starboard_store=info,warn")
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
