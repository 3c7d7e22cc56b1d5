//! Per-repository mutation guard.
//!
//! At most one bookmark toggle or note save may be in flight for a given
//! repository. A second attempt is rejected instead of queued.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use starboard_shared::RepoId;

#[derive(Debug, Clone, Default)]
pub struct MutationGuard {
    in_flight: Arc<Mutex<HashSet<RepoId>>>,
}

impl MutationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `repo_id`, or `None` if a mutation for it is already running.
    pub fn try_acquire(&self, repo_id: RepoId) -> Option<MutationPermit> {
        if !self.lock().insert(repo_id) {
            return None;
        }
        Some(MutationPermit {
            repo_id,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self, repo_id: RepoId) -> bool {
        self.lock().contains(&repo_id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<RepoId>> {
        // The set stays consistent even if a holder panicked.
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Releases its repository when dropped.
#[derive(Debug)]
pub struct MutationPermit {
    repo_id: RepoId,
    in_flight: Arc<Mutex<HashSet<RepoId>>>,
}

impl MutationPermit {
    pub fn repo_id(&self) -> RepoId {
        self.repo_id
    }
}

impl Drop for MutationPermit {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.repo_id);
    }
}
