//! HTTP client for the remote note service.
//!
//! Thin, session-scoped wrapper over the documented REST routes. Session
//! establishment itself is handled elsewhere; this client only attaches an
//! opaque session cookie to each request.

use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::validate_base_url;
use crate::error::{Error, Result};
use crate::migrate::MigrationTarget;
use crate::models::{Note, NoteId, NotePatch, Notebook, NotebookId, Snapshot};
use crate::store::NoteBackend;

/// Client for `/notes`, `/notebooks`, and `/notes/migrate`.
#[derive(Debug, Clone)]
pub struct RemoteNoteClient {
    base_url: String,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

impl RemoteNoteClient {
    /// Create a client for the given base URL (scheme required, trailing
    /// slashes stripped).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: validate_base_url(base_url.into())?,
            session_cookie: None,
            client: reqwest::Client::builder().build()?,
        })
    }

    /// Attach an opaque session cookie to every request.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    // ── Notes ───────────────────────────────────────────────────

    /// `GET /notes` — all notes for the session, newest-updated first.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self.get("/notes").send().await?;
        Self::parse_json(response).await
    }

    /// `GET /notes/{id}`
    pub async fn get_note(&self, id: &NoteId) -> Result<Note> {
        let response = self.get(&format!("/notes/{id}")).send().await?;
        Self::parse_json(response).await
    }

    /// `POST /notes` — create a note from a draft snapshot; the response
    /// carries the server-issued identifier and timestamps.
    pub async fn create_note(&self, snapshot: &Snapshot) -> Result<Note> {
        let response = self.post("/notes").json(snapshot).send().await?;
        Self::parse_json(response).await
    }

    /// `PATCH /notes/{id}` — partial update of the listed fields.
    pub async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note> {
        let response = self.patch(&format!("/notes/{id}")).json(patch).send().await?;
        Self::parse_json(response).await
    }

    /// `DELETE /notes/{id}`
    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let response = self.delete(&format!("/notes/{id}")).send().await?;
        Self::expect_success(response).await
    }

    // ── Notebooks ───────────────────────────────────────────────

    /// `GET /notebooks`
    pub async fn list_notebooks(&self) -> Result<Vec<Notebook>> {
        let response = self.get("/notebooks").send().await?;
        Self::parse_json(response).await
    }

    /// `POST /notebooks`
    pub async fn create_notebook(&self, name: &str) -> Result<Notebook> {
        let body = NotebookBody { name };
        let response = self.post("/notebooks").json(&body).send().await?;
        Self::parse_json(response).await
    }

    /// `PATCH /notebooks/{id}`
    pub async fn rename_notebook(&self, id: &NotebookId, name: &str) -> Result<Notebook> {
        let body = NotebookBody { name };
        let response = self
            .patch(&format!("/notebooks/{id}"))
            .json(&body)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// `DELETE /notebooks/{id}` — the service clears the notebook reference
    /// on affected notes; notes themselves survive.
    pub async fn delete_notebook(&self, id: &NotebookId) -> Result<()> {
        let response = self.delete(&format!("/notebooks/{id}")).send().await?;
        Self::expect_success(response).await
    }

    // ── Request plumbing ────────────────────────────────────────

    fn get(&self, path: &str) -> RequestBuilder {
        self.decorate(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.decorate(self.client.post(self.url(path)))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.decorate(self.client.patch(self.url(path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.decorate(self.client.delete(self.url(path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match &self.session_cookie {
            Some(cookie) => builder.header("Cookie", cookie.as_str()),
            None => builder,
        }
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn expect_success(response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::NOT_FOUND => Error::NotFound(parse_api_error(status, &body)),
            _ => Error::Api(parse_api_error(status, &body)),
        })
    }
}

#[async_trait::async_trait]
impl NoteBackend for RemoteNoteClient {
    async fn create(&self, snapshot: &Snapshot) -> Result<Note> {
        self.create_note(snapshot).await
    }

    async fn update(&self, id: &NoteId, snapshot: &Snapshot) -> Result<Note> {
        self.update_note(id, &NotePatch::from(snapshot.clone())).await
    }
}

#[async_trait::async_trait]
impl MigrationTarget for RemoteNoteClient {
    /// `POST /notes/migrate` — bulk-create the supplied notes.
    async fn bulk_create(&self, notes: &[Note]) -> Result<Vec<Note>> {
        let body = MigrateBody { notes };
        let response = self.post("/notes/migrate").json(&body).send().await?;
        Self::parse_json(response).await
    }
}

#[derive(Serialize)]
struct NotebookBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct MigrateBody<'a> {
    notes: &'a [Note],
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Build a readable error string from a failed response, preferring the
/// service's own `message`/`error` fields over the raw body.
fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed: String = body.trim().chars().take(180).collect();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
