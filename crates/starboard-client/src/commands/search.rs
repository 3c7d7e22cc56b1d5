//! Debounced repository search.
//!
//! A filter change bumps the search generation and arms a timer for it. A
//! newer change aborts the armed timer; a response that arrives for an older
//! generation is dropped by the reducer.

use std::sync::MutexGuard;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use starboard_search::SearchQuery;
use starboard_shared::{LanguageFilter, SearchFilters, SortKey, SortOrder};

use crate::controller::Controller;
use crate::error::Result;
use crate::reducer::Action;

impl Controller {
    pub fn set_query(&self, query: impl Into<String>) -> bool {
        let query = query.into();
        self.update_filters(|f| f.query = query)
    }

    pub fn set_language(&self, language: LanguageFilter) -> bool {
        self.update_filters(|f| f.language = language)
    }

    pub fn set_sort_key(&self, sort: SortKey) -> bool {
        self.update_filters(|f| f.sort = sort)
    }

    pub fn set_sort_order(&self, order: SortOrder) -> bool {
        self.update_filters(|f| f.order = order)
    }

    pub fn toggle_sort_order(&self) -> bool {
        self.update_filters(|f| f.order = f.order.toggled())
    }

    /// Edit the filters and, if they changed, schedule a debounced search.
    /// Returns whether a search was scheduled.
    pub fn update_filters(&self, edit: impl FnOnce(&mut SearchFilters)) -> bool {
        // Held across the generation bump so pending tasks are swapped in
        // generation order. Always taken before the state lock.
        let mut pending = self.lock_pending();

        let (events, generation) = {
            let mut state = self.lock_state();
            let mut filters = state.filters.clone();
            edit(&mut filters);

            let events = state.apply(Action::FiltersChanged(filters));
            if events.is_empty() {
                return false;
            }
            state.apply(Action::SearchScheduled);
            (events, state.search_generation)
        };

        if let Some(previous) = pending.replace(self.spawn_debounced(generation)) {
            previous.abort();
        }
        drop(pending);

        self.emit(events);
        true
    }

    /// Search with the current filters right away, superseding any pending
    /// debounced search.
    pub async fn search_now(&self) -> Result<()> {
        let generation = {
            let mut pending = self.lock_pending();
            if let Some(previous) = pending.take() {
                previous.abort();
            }
            let mut state = self.lock_state();
            state.apply(Action::SearchScheduled);
            state.search_generation
        };
        self.run_search(generation).await
    }

    fn spawn_debounced(&self, generation: u64) -> JoinHandle<()> {
        let delay = self.inner.config.search_debounce;
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = controller.run_search(generation).await;
        })
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .pending_search
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    async fn run_search(&self, generation: u64) -> Result<()> {
        let query = {
            let state = self.lock_state();
            if state.search_generation != generation {
                debug!(generation, "Search superseded before it was sent");
                return Ok(());
            }
            SearchQuery::from_filters(&state.filters, self.inner.config.search_page_size)
        };

        self.apply(Action::SearchStarted { generation });
        debug!(generation, q = %query.q, "Running search");

        match self.inner.search.search(&query).await {
            Ok(page) => {
                debug!(generation, count = page.items.len(), total = page.total_count, "Search finished");
                self.apply(Action::SearchSucceeded {
                    generation,
                    repositories: page.items,
                });
                Ok(())
            }
            Err(e) => {
                if e.is_rate_limited() {
                    warn!(generation, error = %e, "Search rate limited");
                } else {
                    warn!(generation, error = %e, "Search failed");
                }
                self.apply(Action::SearchFailed { generation });
                Err(e.into())
            }
        }
    }
}
