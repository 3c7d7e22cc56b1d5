//! PostgREST client for the hosted bookmark/note store.
//!
//! Each collection is a table under `<url>/rest/v1/`. Writes ask for
//! `Prefer: return=representation` so the stored row (with its assigned id
//! and timestamps) comes back in the response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use starboard_shared::constants::{BOOKMARKS_TABLE, NOTES_TABLE};
use starboard_shared::{Bookmark, BookmarkId, NewBookmark, NewNote, Note, NoteChanges, NoteId, RepoId};

use crate::error::{Result, StoreError};
use crate::provider::PersistenceProvider;

const ORDER_NEWEST_FIRST: (&str, &str) = ("order", "created_at.desc");
const SELECT_ALL: (&str, &str) = ("select", "*");

/// Connection settings for [`RestStore`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anonymous (public) API key.
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: RestConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn write(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table)
            .header("Prefer", "return=representation")
    }
}

#[async_trait]
impl PersistenceProvider for RestStore {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let resp = self
            .request(Method::GET, BOOKMARKS_TABLE)
            .query(&[SELECT_ALL, ORDER_NEWEST_FIRST])
            .send()
            .await?;
        let rows: Vec<Bookmark> = read_json(resp).await?;
        debug!(count = rows.len(), "Listed bookmarks");
        Ok(rows)
    }

    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark> {
        let resp = self
            .write(Method::POST, BOOKMARKS_TABLE)
            .json(bookmark)
            .send()
            .await?;
        let created = first_row::<Bookmark>(resp)
            .await?
            .ok_or(StoreError::EmptyResponse)?;
        debug!(bookmark_id = %created.id, repo_id = %created.repo_id, "Created bookmark");
        Ok(created)
    }

    async fn delete_bookmark(&self, id: &BookmarkId) -> Result<()> {
        let resp = self
            .request(Method::DELETE, BOOKMARKS_TABLE)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        ensure_success(resp).await?;
        debug!(bookmark_id = %id, "Deleted bookmark");
        Ok(())
    }

    async fn find_bookmark_by_repo(&self, repo_id: RepoId) -> Result<Option<Bookmark>> {
        let resp = self
            .request(Method::GET, BOOKMARKS_TABLE)
            .query(&[
                ("select", "*".to_string()),
                ("repo_id", format!("eq.{repo_id}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;
        first_row(resp).await
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        let resp = self
            .request(Method::GET, NOTES_TABLE)
            .query(&[SELECT_ALL, ORDER_NEWEST_FIRST])
            .send()
            .await?;
        let rows: Vec<Note> = read_json(resp).await?;
        debug!(count = rows.len(), "Listed notes");
        Ok(rows)
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let resp = self
            .write(Method::POST, NOTES_TABLE)
            .json(note)
            .send()
            .await?;
        let created = first_row::<Note>(resp)
            .await?
            .ok_or(StoreError::EmptyResponse)?;
        debug!(note_id = %created.id, bookmark_id = %created.bookmark_id, "Created note");
        Ok(created)
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note> {
        let resp = self
            .write(Method::PATCH, NOTES_TABLE)
            .query(&[("id", format!("eq.{id}"))])
            .json(changes)
            .send()
            .await?;
        // PATCH with a filter that matches nothing succeeds with an empty array.
        let updated = first_row::<Note>(resp).await?.ok_or(StoreError::NotFound)?;
        debug!(note_id = %updated.id, "Updated note");
        Ok(updated)
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let resp = ensure_success(resp).await?;
    Ok(resp.json::<T>().await?)
}

async fn first_row<T: DeserializeOwned>(resp: Response) -> Result<Option<T>> {
    let rows: Vec<T> = read_json(resp).await?;
    Ok(rows.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const BOOKMARK_ROW: &str = r#"{
        "id": "b1", "repo_id": 42, "repo_name": "facebook/react",
        "repo_url": "https://github.com/facebook/react",
        "description": "UI library", "stars": 230000, "forks": 47000,
        "language": "JavaScript", "topics": ["react"],
        "created_at": "2024-01-01T00:00:00Z"
    }"#;

    const NOTE_ROW: &str = r#"{
        "id": "n1", "bookmark_id": "b1", "content": "great lib",
        "created_at": "2024-01-02T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z"
    }"#;

    fn store_for(server: &Server) -> RestStore {
        RestStore::new(RestConfig {
            url: server.url(),
            api_key: "anon-key".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn new_bookmark() -> NewBookmark {
        NewBookmark {
            repo_id: RepoId(42),
            repo_full_name: "facebook/react".into(),
            repo_url: "https://github.com/facebook/react".into(),
            description: "UI library".into(),
            star_count: 230000,
            fork_count: 47000,
            language: "JavaScript".into(),
            topics: vec!["react".into()],
        }
    }

    #[tokio::test]
    async fn test_list_bookmarks_newest_first() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/bookmarks")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "*".into()),
                Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
            ]))
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .with_status(200)
            .with_body(format!("[{BOOKMARK_ROW}]"))
            .create_async()
            .await;

        let rows = store_for(&server).list_bookmarks().await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, BookmarkId::from("b1"));
    }

    #[tokio::test]
    async fn test_create_bookmark_sends_snapshot() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/bookmarks")
            .match_header("prefer", "return=representation")
            .match_body(Matcher::Json(json!({
                "repo_id": 42,
                "repo_name": "facebook/react",
                "repo_url": "https://github.com/facebook/react",
                "description": "UI library",
                "stars": 230000,
                "forks": 47000,
                "language": "JavaScript",
                "topics": ["react"]
            })))
            .with_status(201)
            .with_body(format!("[{BOOKMARK_ROW}]"))
            .create_async()
            .await;

        let created = store_for(&server)
            .create_bookmark(&new_bookmark())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, BookmarkId::from("b1"));
        assert_eq!(created.repo_id, RepoId(42));
    }

    #[tokio::test]
    async fn test_create_bookmark_empty_representation() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/rest/v1/bookmarks")
            .with_status(201)
            .with_body("[]")
            .create_async()
            .await;

        let err = store_for(&server)
            .create_bookmark(&new_bookmark())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_delete_bookmark_filters_by_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/rest/v1/bookmarks")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.b1".into()))
            .with_status(204)
            .create_async()
            .await;

        store_for(&server)
            .delete_bookmark(&BookmarkId::from("b1"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_bookmark_error_status() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/rest/v1/bookmarks")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message":"Invalid API key"}"#)
            .create_async()
            .await;

        let err = store_for(&server)
            .delete_bookmark(&BookmarkId::from("b1"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_find_bookmark_by_repo() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/rest/v1/bookmarks")
            .match_query(Matcher::UrlEncoded("repo_id".into(), "eq.42".into()))
            .with_status(200)
            .with_body(format!("[{BOOKMARK_ROW}]"))
            .create_async()
            .await;
        server
            .mock("GET", "/rest/v1/bookmarks")
            .match_query(Matcher::UrlEncoded("repo_id".into(), "eq.7".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let store = store_for(&server);
        let found = store.find_bookmark_by_repo(RepoId(42)).await.unwrap();
        assert_eq!(found.map(|b| b.id), Some(BookmarkId::from("b1")));
        assert!(store.find_bookmark_by_repo(RepoId(7)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_note() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/notes")
            .match_body(Matcher::Json(json!({
                "bookmark_id": "b1",
                "content": "great lib"
            })))
            .with_status(201)
            .with_body(format!("[{NOTE_ROW}]"))
            .create_async()
            .await;

        let note = store_for(&server)
            .create_note(&NewNote {
                bookmark_id: BookmarkId::from("b1"),
                content: "great lib".into(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(note.id, NoteId::from("n1"));
    }

    #[tokio::test]
    async fn test_update_note_patches_by_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/rest/v1/notes")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.n1".into()))
            .match_body(Matcher::PartialJson(json!({ "content": "great lib" })))
            .with_status(200)
            .with_body(format!("[{NOTE_ROW}]"))
            .create_async()
            .await;

        let note = store_for(&server)
            .update_note(
                &NoteId::from("n1"),
                &NoteChanges {
                    content: "great lib".into(),
                    updated_at: chrono::Utc::now(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(note.content, "great lib");
    }

    #[tokio::test]
    async fn test_update_missing_note() {
        let mut server = Server::new_async().await;
        server
            .mock("PATCH", "/rest/v1/notes")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let err = store_for(&server)
            .update_note(
                &NoteId::from("missing"),
                &NoteChanges {
                    content: "x".into(),
                    updated_at: chrono::Utc::now(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
