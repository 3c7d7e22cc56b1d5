//! # starboard-store
//!
//! Persistence for bookmarks and the notes attached to them.
//!
//! The crate exposes the [`PersistenceProvider`] trait together with two
//! implementations: [`RestStore`], which talks to a hosted PostgREST
//! endpoint (Supabase), and [`InMemoryStore`], which keeps everything in
//! process.

pub mod memory;
pub mod provider;
pub mod rest;

mod error;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use provider::PersistenceProvider;
pub use rest::{RestConfig, RestStore};
