//! Local mode: the client state driving the store in-process.

use async_trait::async_trait;

use super::NoteApi;
use crate::db::Database;
use crate::error::RequestError;
use crate::models::{CreateNoteInput, Note, Scope, UpdateNoteInput};

fn storage(err: anyhow::Error) -> RequestError {
    RequestError::Storage {
        status: 500,
        body: err.to_string(),
    }
}

#[async_trait]
impl NoteApi for Database {
    async fn list_notes(&self, scope: Scope) -> Result<Vec<Note>, RequestError> {
        Database::list_notes(self, scope).map_err(storage)
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RequestError> {
        Database::get_note(self, id).map_err(storage)
    }

    async fn create_note(&self, input: &CreateNoteInput) -> Result<(), RequestError> {
        Database::create_note(self, input.clone())
            .map(|_| ())
            .map_err(storage)
    }

    async fn update_note(&self, id: i64, input: &UpdateNoteInput) -> Result<(), RequestError> {
        Database::update_note(self, id, input.clone())
            .map(|_| ())
            .map_err(storage)
    }

    async fn archive_note(&self, id: i64) -> Result<(), RequestError> {
        Database::archive_note(self, id).map(|_| ()).map_err(storage)
    }

    async fn unarchive_note(&self, id: i64) -> Result<(), RequestError> {
        Database::unarchive_note(self, id)
            .map(|_| ())
            .map_err(storage)
    }

    async fn delete_note(&self, id: i64) -> Result<(), RequestError> {
        Database::delete_note(self, id).map(|_| ()).map_err(storage)
    }
}
