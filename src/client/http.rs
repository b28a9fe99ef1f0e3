use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::NoteApi;
use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::models::{CreateNoteInput, Note, Scope, UpdateNoteInput};

/// [`NoteApi`] over the REST interface served by [`crate::api`].
#[derive(Clone)]
pub struct HttpNoteApi {
    client: Client,
    base_url: String,
}

impl HttpNoteApi {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success status into [`RequestError::Storage`].
    async fn check(response: Response) -> Result<Response, RequestError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RequestError::Storage {
            status: status.as_u16(),
            body,
        })
    }

    async fn ack(response: Response) -> Result<(), RequestError> {
        let response = Self::check(response).await?;
        let ack = response.text().await?;
        tracing::debug!("Store acknowledged: {}", ack);
        Ok(())
    }
}

#[async_trait]
impl NoteApi for HttpNoteApi {
    async fn list_notes(&self, scope: Scope) -> Result<Vec<Note>, RequestError> {
        let path = match scope {
            Scope::Active => "/notes",
            Scope::Archived => "/notes/archived",
        };
        let response = self.client.get(self.url(path)).send().await?;
        let notes = Self::check(response).await?.json().await?;
        Ok(notes)
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RequestError> {
        let response = self
            .client
            .get(self.url(&format!("/notes/{}", id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let note = Self::check(response).await?.json().await?;
        Ok(Some(note))
    }

    async fn create_note(&self, input: &CreateNoteInput) -> Result<(), RequestError> {
        let response = self
            .client
            .post(self.url("/notes"))
            .json(input)
            .send()
            .await?;
        Self::ack(response).await
    }

    async fn update_note(&self, id: i64, input: &UpdateNoteInput) -> Result<(), RequestError> {
        let response = self
            .client
            .put(self.url(&format!("/notes/{}", id)))
            .json(input)
            .send()
            .await?;
        Self::ack(response).await
    }

    async fn archive_note(&self, id: i64) -> Result<(), RequestError> {
        let response = self
            .client
            .put(self.url(&format!("/notes/archive/{}", id)))
            .send()
            .await?;
        Self::ack(response).await
    }

    async fn unarchive_note(&self, id: i64) -> Result<(), RequestError> {
        let response = self
            .client
            .put(self.url(&format!("/notes/unarchive/{}", id)))
            .send()
            .await?;
        Self::ack(response).await
    }

    async fn delete_note(&self, id: i64) -> Result<(), RequestError> {
        let response = self
            .client
            .delete(self.url(&format!("/notes/{}", id)))
            .send()
            .await?;
        Self::ack(response).await
    }
}
