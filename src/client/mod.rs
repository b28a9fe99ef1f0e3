//! The seam between client state and the note store.
//!
//! [`NoteCollection`](crate::state::NoteCollection) and
//! [`NoteEditor`](crate::state::NoteEditor) only talk to a [`NoteApi`]. The
//! usual implementation is [`HttpNoteApi`] against a running server; a
//! [`Database`](crate::db::Database) can be used directly for local mode.

mod http;
mod local;

use async_trait::async_trait;

use crate::error::RequestError;
use crate::models::{CreateNoteInput, Note, Scope, UpdateNoteInput};

pub use http::HttpNoteApi;

/// Note store operations as seen by a client. Mutations only acknowledge.
#[async_trait]
pub trait NoteApi: Send + Sync {
    async fn list_notes(&self, scope: Scope) -> Result<Vec<Note>, RequestError>;

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RequestError>;

    async fn create_note(&self, input: &CreateNoteInput) -> Result<(), RequestError>;

    async fn update_note(&self, id: i64, input: &UpdateNoteInput) -> Result<(), RequestError>;

    async fn archive_note(&self, id: i64) -> Result<(), RequestError>;

    async fn unarchive_note(&self, id: i64) -> Result<(), RequestError>;

    async fn delete_note(&self, id: i64) -> Result<(), RequestError>;
}
