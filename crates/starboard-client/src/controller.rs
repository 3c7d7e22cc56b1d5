//! The [`Controller`] owns the application state and both providers.
//!
//! Presentation code talks to it through [`Intent`]s (or the typed methods
//! in [`crate::commands`]), reads [`Controller::snapshot`], and listens on
//! [`Controller::subscribe`] for change notifications.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use starboard_search::{GithubClient, SearchProvider};
use starboard_shared::{LanguageFilter, RepoId, RepositorySummary, SortKey, SortOrder, Tab};
use starboard_store::{PersistenceProvider, RestStore};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::{emit_events, StateEvent};
use crate::guard::{MutationGuard, MutationPermit};
use crate::reducer::Action;
use crate::state::AppState;

const EVENT_CAPACITY: usize = 64;

/// A user intent raised by the presentation layer.
#[derive(Debug, Clone)]
pub enum Intent {
    SetQuery(String),
    SetLanguage(LanguageFilter),
    SetSortKey(SortKey),
    SetSortOrder(SortOrder),
    ToggleSortOrder,
    SelectTab(Tab),
    ToggleBookmark(RepositorySummary),
    OpenNoteEditor(RepositorySummary),
    CloseNoteEditor,
    /// Save against the repository of the open note editor.
    SaveNote { content: String },
    Refresh,
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Controller {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) config: ClientConfig,
    state: Mutex<AppState>,
    pub(crate) search: Arc<dyn SearchProvider>,
    pub(crate) store: Arc<dyn PersistenceProvider>,
    guard: MutationGuard,
    events: broadcast::Sender<StateEvent>,
    /// Debounce task of the most recently scheduled search, if not yet run.
    pub(crate) pending_search: Mutex<Option<JoinHandle<()>>>,
}

impl Controller {
    pub fn new(
        config: ClientConfig,
        search: Arc<dyn SearchProvider>,
        store: Arc<dyn PersistenceProvider>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(AppState::new()),
                search,
                store,
                guard: MutationGuard::new(),
                events,
                pending_search: Mutex::new(None),
            }),
        }
    }

    /// Build a controller talking to GitHub and the hosted store.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let search = GithubClient::new(config.github())?;
        let store = RestStore::new(config.store())?;
        Ok(Self::new(config, Arc::new(search), Arc::new(store)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.inner.events.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.lock_state().clone()
    }

    pub fn is_mutation_in_flight(&self, repo_id: RepoId) -> bool {
        self.inner.guard.is_in_flight(repo_id)
    }

    /// Load bookmarks and notes, then run the first search immediately.
    pub async fn start(&self) {
        info!("Starting starboard client");
        self.refresh().await;
    }

    /// Reload both persisted collections and repeat the current search.
    pub async fn refresh(&self) {
        // Failures are logged by the loaders; the affected collection keeps
        // its previous contents.
        let _ = tokio::join!(self.load_bookmarks(), self.load_notes());
        let _ = self.search_now().await;
    }

    pub fn select_tab(&self, tab: Tab) {
        self.apply(Action::TabSelected(tab));
    }

    /// Route an intent. Errors are logged, never returned.
    pub async fn dispatch(&self, intent: Intent) {
        debug!(?intent, "Dispatching intent");

        let outcome = match intent {
            Intent::SetQuery(query) => {
                self.set_query(query);
                Ok(())
            }
            Intent::SetLanguage(language) => {
                self.set_language(language);
                Ok(())
            }
            Intent::SetSortKey(key) => {
                self.set_sort_key(key);
                Ok(())
            }
            Intent::SetSortOrder(order) => {
                self.set_sort_order(order);
                Ok(())
            }
            Intent::ToggleSortOrder => {
                self.toggle_sort_order();
                Ok(())
            }
            Intent::SelectTab(tab) => {
                self.select_tab(tab);
                Ok(())
            }
            Intent::ToggleBookmark(repo) => self.toggle_bookmark(&repo).await.map(|_| ()),
            Intent::OpenNoteEditor(repo) => {
                self.open_note_editor(repo);
                Ok(())
            }
            Intent::CloseNoteEditor => {
                self.close_note_editor();
                Ok(())
            }
            Intent::SaveNote { content } => self.save_note_from_editor(&content).await.map(|_| ()),
            Intent::Refresh => {
                self.refresh().await;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            debug!(error = %e, "Intent did not complete");
        }
    }

    // -- internals shared by the command modules --

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, AppState> {
        // Transitions never panic halfway, so a poisoned state is still whole.
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock_state())
    }

    /// Apply `action` and notify subscribers.
    pub(crate) fn apply(&self, action: Action) {
        let events = self.lock_state().apply(action);
        self.emit(events);
    }

    pub(crate) fn emit(&self, events: Vec<StateEvent>) {
        emit_events(&self.inner.events, events);
    }

    pub(crate) fn acquire(&self, repo_id: RepoId) -> Result<MutationPermit> {
        self.inner.guard.try_acquire(repo_id).ok_or_else(|| {
            warn!(%repo_id, "Rejected change: another one is still in flight");
            ClientError::MutationInFlight(repo_id)
        })
    }
}
