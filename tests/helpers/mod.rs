#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use klanotes::client::NoteApi;
use klanotes::db::Database;
use klanotes::error::RequestError;
use klanotes::models::{CreateNoteInput, Note, Scope, UpdateNoteInput};

pub fn setup_db() -> Database {
    let db = Database::open_memory().expect("Failed to create test database");
    db.migrate().expect("Failed to migrate test database");
    db
}

pub fn create_test_note(db: &Database, title: &str, pinned: bool) -> Note {
    let mut input = CreateNoteInput::new(title, format!("{} body", title));
    input.pinned = pinned;
    db.create_note(input).expect("Failed to insert note")
}

/// A store that can be told to fail requests, and counts the ones it gets.
pub struct FlakyApi {
    db: Database,
    failing_ids: Mutex<HashSet<i64>>,
    fail_everything: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyApi {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(Self {
            db,
            failing_ids: Mutex::new(HashSet::new()),
            fail_everything: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn fail_id(&self, id: i64) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    pub fn fail_everything(&self, fail: bool) {
        self.fail_everything.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn gate(&self, id: Option<i64>) -> Result<(), RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.fail_everything.load(Ordering::SeqCst)
            || id.is_some_and(|id| self.failing_ids.lock().unwrap().contains(&id));
        if failing {
            Err(RequestError::Storage {
                status: 500,
                body: "simulated driver failure".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NoteApi for FlakyApi {
    async fn list_notes(&self, scope: Scope) -> Result<Vec<Note>, RequestError> {
        self.gate(None)?;
        NoteApi::list_notes(&self.db, scope).await
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RequestError> {
        self.gate(Some(id))?;
        NoteApi::get_note(&self.db, id).await
    }

    async fn create_note(&self, input: &CreateNoteInput) -> Result<(), RequestError> {
        self.gate(None)?;
        NoteApi::create_note(&self.db, input).await
    }

    async fn update_note(&self, id: i64, input: &UpdateNoteInput) -> Result<(), RequestError> {
        self.gate(Some(id))?;
        NoteApi::update_note(&self.db, id, input).await
    }

    async fn archive_note(&self, id: i64) -> Result<(), RequestError> {
        self.gate(Some(id))?;
        NoteApi::archive_note(&self.db, id).await
    }

    async fn unarchive_note(&self, id: i64) -> Result<(), RequestError> {
        self.gate(Some(id))?;
        NoteApi::unarchive_note(&self.db, id).await
    }

    async fn delete_note(&self, id: i64) -> Result<(), RequestError> {
        self.gate(Some(id))?;
        NoteApi::delete_note(&self.db, id).await
    }
}

/// A store whose list and create calls park until the test releases them.
pub struct GatedApi {
    db: Database,
    entered: tokio::sync::Notify,
    release: tokio::sync::Notify,
}

impl GatedApi {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(Self {
            db,
            entered: tokio::sync::Notify::new(),
            release: tokio::sync::Notify::new(),
        })
    }

    /// Resolves once a gated call is waiting.
    pub async fn wait_for_request(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn gate(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl NoteApi for GatedApi {
    async fn list_notes(&self, scope: Scope) -> Result<Vec<Note>, RequestError> {
        self.gate().await;
        NoteApi::list_notes(&self.db, scope).await
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, RequestError> {
        NoteApi::get_note(&self.db, id).await
    }

    async fn create_note(&self, input: &CreateNoteInput) -> Result<(), RequestError> {
        self.gate().await;
        NoteApi::create_note(&self.db, input).await
    }

    async fn update_note(&self, id: i64, input: &UpdateNoteInput) -> Result<(), RequestError> {
        NoteApi::update_note(&self.db, id, input).await
    }

    async fn archive_note(&self, id: i64) -> Result<(), RequestError> {
        NoteApi::archive_note(&self.db, id).await
    }

    async fn unarchive_note(&self, id: i64) -> Result<(), RequestError> {
        NoteApi::unarchive_note(&self.db, id).await
    }

    async fn delete_note(&self, id: i64) -> Result<(), RequestError> {
        NoteApi::delete_note(&self.db, id).await
    }
}
