//! Fixtures and fake providers shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Semaphore;

use starboard_search::error::Result as SearchResult;
use starboard_search::{SearchError, SearchProvider, SearchQuery};
use starboard_shared::{
    Bookmark, BookmarkId, NewBookmark, NewNote, Note, NoteChanges, NoteId, Owner, RepoId,
    RepositorySummary, SearchPage,
};
use starboard_store::{InMemoryStore, PersistenceProvider, Result as StoreResult, StoreError};

use crate::config::ClientConfig;
use crate::controller::Controller;

pub fn sample_repo(id: u64, full_name: &str) -> RepositorySummary {
    let (login, name) = full_name.split_once('/').unwrap_or((full_name, full_name));
    RepositorySummary {
        id: RepoId(id),
        name: name.to_string(),
        full_name: full_name.to_string(),
        owner: Owner {
            login: login.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
        },
        url: format!("https://github.com/{full_name}"),
        description: Some("A repository".into()),
        star_count: 1000 + id,
        fork_count: id,
        open_issue_count: 3,
        primary_language: Some("Rust".into()),
        topics: vec!["cli".into()],
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn bookmark(id: &str, repo_id: u64) -> Bookmark {
    Bookmark {
        id: BookmarkId::from(id),
        repo_id: RepoId(repo_id),
        repo_full_name: format!("owner{repo_id}/repo{repo_id}"),
        repo_url: format!("https://github.com/owner{repo_id}/repo{repo_id}"),
        description: "snapshot".into(),
        star_count: 10,
        fork_count: 2,
        language: "Go".into(),
        topics: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn note(id: &str, bookmark_id: &str, content: &str) -> Note {
    let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    Note {
        id: NoteId::from(id),
        bookmark_id: BookmarkId::from(bookmark_id),
        content: content.to_string(),
        created_at: at,
        updated_at: at,
    }
}

pub fn controller_with(
    config: ClientConfig,
    search: Arc<ScriptedSearch>,
    store: Arc<TestStore>,
) -> Controller {
    Controller::new(config, search, store)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Records every query. Answers per `q` string with configured results,
/// delays, or failures; anything unconfigured gets one default repository.
#[derive(Default)]
pub struct ScriptedSearch {
    queries: Mutex<Vec<SearchQuery>>,
    results: Mutex<HashMap<String, Vec<RepositorySummary>>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing: Mutex<HashSet<String>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, q: &str, items: Vec<RepositorySummary>) {
        self.results.lock().unwrap().insert(q.to_string(), items);
    }

    pub fn delay(&self, q: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(q.to_string(), delay);
    }

    pub fn fail(&self, q: &str) {
        self.failing.lock().unwrap().insert(q.to_string());
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    async fn search(&self, query: &SearchQuery) -> SearchResult<SearchPage> {
        self.queries.lock().unwrap().push(query.clone());

        let delay = self.delays.lock().unwrap().get(&query.q).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(&query.q) {
            return Err(SearchError::Status {
                status: 503,
                message: "Service Unavailable".into(),
            });
        }

        let items = self
            .results
            .lock()
            .unwrap()
            .get(&query.q)
            .cloned()
            .unwrap_or_else(|| vec![sample_repo(1, "octo/default")]);
        Ok(SearchPage {
            total_count: items.len() as u64,
            items,
        })
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// [`InMemoryStore`] with call recording and injected failures. Gates can
/// hold bookmark creation, or the reply of a list call after its snapshot
/// was taken, until released.
pub struct TestStore {
    inner: InMemoryStore,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    hold_creates: AtomicBool,
    gate: Semaphore,
    hold_lists: AtomicBool,
    list_gate: Semaphore,
    lists_waiting: AtomicUsize,
    hide_find: AtomicBool,
    next_bookmark: Mutex<Option<(BookmarkId, DateTime<Utc>)>>,
    new_bookmarks: Mutex<Vec<NewBookmark>>,
    new_notes: Mutex<Vec<NewNote>>,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            hold_creates: AtomicBool::new(false),
            gate: Semaphore::new(0),
            hold_lists: AtomicBool::new(false),
            list_gate: Semaphore::new(0),
            lists_waiting: AtomicUsize::new(0),
            hide_find: AtomicBool::new(false),
            next_bookmark: Mutex::new(None),
            new_bookmarks: Mutex::new(Vec::new()),
            new_notes: Mutex::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn hold_creates(&self) {
        self.hold_creates.store(true, Ordering::SeqCst);
    }

    pub fn release_creates(&self) {
        self.hold_creates.store(false, Ordering::SeqCst);
        self.gate.add_permits(1024);
    }

    pub fn hold_lists(&self) {
        self.hold_lists.store(true, Ordering::SeqCst);
    }

    pub fn release_lists(&self) {
        self.hold_lists.store(false, Ordering::SeqCst);
        self.list_gate.add_permits(1024);
    }

    /// List calls that have read the store and are waiting to reply.
    pub fn lists_waiting(&self) -> usize {
        self.lists_waiting.load(Ordering::SeqCst)
    }

    pub fn hide_find_results(&self) {
        self.hide_find.store(true, Ordering::SeqCst);
    }

    /// Make the next created bookmark come back with this id and timestamp.
    pub fn assign_next_bookmark(&self, id: &str, created_at: DateTime<Utc>) {
        *self.next_bookmark.lock().unwrap() = Some((BookmarkId::from(id), created_at));
    }

    pub fn last_new_bookmark(&self) -> Option<NewBookmark> {
        self.new_bookmarks.lock().unwrap().last().cloned()
    }

    pub fn last_new_note(&self) -> Option<NewNote> {
        self.new_notes.lock().unwrap().last().cloned()
    }

    /// Insert a bookmark directly, bypassing call recording.
    pub async fn seed_bookmark(&self, repo: RepositorySummary) -> Bookmark {
        self.inner.create_bookmark(&NewBookmark::from(&repo)).await.unwrap()
    }

    async fn reply_later(&self) {
        if self.hold_lists.load(Ordering::SeqCst) {
            self.lists_waiting.fetch_add(1, Ordering::SeqCst);
            self.list_gate.acquire().await.unwrap().forget();
            self.lists_waiting.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, op: &'static str) -> StoreResult<()> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.failing.lock().unwrap().contains(op) {
            return Err(StoreError::Status {
                status: 500,
                body: format!("{op} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceProvider for TestStore {
    async fn list_bookmarks(&self) -> StoreResult<Vec<Bookmark>> {
        self.enter("list_bookmarks")?;
        let bookmarks = self.inner.list_bookmarks().await?;
        self.reply_later().await;
        Ok(bookmarks)
    }

    async fn create_bookmark(&self, bookmark: &NewBookmark) -> StoreResult<Bookmark> {
        self.enter("create_bookmark")?;
        self.new_bookmarks.lock().unwrap().push(bookmark.clone());

        if self.hold_creates.load(Ordering::SeqCst) {
            self.gate.acquire().await.unwrap().forget();
        }

        let mut created = self.inner.create_bookmark(bookmark).await?;
        let assigned = self.next_bookmark.lock().unwrap().take();
        if let Some((id, created_at)) = assigned {
            created.id = id;
            created.created_at = created_at;
        }
        Ok(created)
    }

    async fn delete_bookmark(&self, id: &BookmarkId) -> StoreResult<()> {
        self.enter("delete_bookmark")?;
        self.inner.delete_bookmark(id).await
    }

    async fn find_bookmark_by_repo(&self, repo_id: RepoId) -> StoreResult<Option<Bookmark>> {
        self.enter("find_bookmark_by_repo")?;
        if self.hide_find.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_bookmark_by_repo(repo_id).await
    }

    async fn list_notes(&self) -> StoreResult<Vec<Note>> {
        self.enter("list_notes")?;
        let notes = self.inner.list_notes().await?;
        self.reply_later().await;
        Ok(notes)
    }

    async fn create_note(&self, note: &NewNote) -> StoreResult<Note> {
        self.enter("create_note")?;
        self.new_notes.lock().unwrap().push(note.clone());
        self.inner.create_note(note).await
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> StoreResult<Note> {
        self.enter("update_note")?;
        self.inner.update_note(id, changes).await
    }
}
