use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiError;
use crate::db::Database;
use crate::models::{CreateNoteInput, Note, Scope, UpdateNoteInput};

pub async fn create(
    State(db): State<Database>,
    Json(input): Json<CreateNoteInput>,
) -> Result<&'static str, ApiError> {
    db.create_note(input)?;
    Ok("Note created")
}

pub async fn list_active(State(db): State<Database>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(db.list_notes(Scope::Active)?))
}

pub async fn list_archived(State(db): State<Database>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(db.list_notes(Scope::Archived)?))
}

pub async fn get(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    db.get_note(id)?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

// Mutations on an unknown id still acknowledge; the store only logs it.

pub async fn update(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateNoteInput>,
) -> Result<&'static str, ApiError> {
    db.update_note(id, input)?;
    Ok("Note updated")
}

pub async fn delete(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    db.delete_note(id)?;
    Ok("Note deleted")
}

pub async fn archive(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    db.archive_note(id)?;
    Ok("Note archived")
}

pub async fn unarchive(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    db.unarchive_note(id)?;
    Ok("Note unarchived")
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::api::create_router;
    use crate::db::Database;
    use crate::models::Note;

    fn setup() -> (TestServer, Database) {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        let server = TestServer::new(create_router(db.clone())).expect("Failed to start test server");
        (server, db)
    }

    #[tokio::test]
    async fn create_then_list_active() {
        let (server, _db) = setup();

        let response = server
            .post("/notes")
            .json(&json!({"title": "A", "content": "", "pinned": false, "archived": false}))
            .await;
        response.assert_status_ok();
        response.assert_text("Note created");

        let notes: Vec<Note> = server.get("/notes").await.json();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
        assert!(!notes[0].archived);
    }

    #[tokio::test]
    async fn create_accepts_integer_flags() {
        let (server, db) = setup();

        server
            .post("/notes")
            .json(&json!({"title": "Pinned", "content": "x", "pinned": 1, "archived": 0}))
            .await
            .assert_status_ok();

        let notes = db.list_notes(crate::models::Scope::Active).unwrap();
        assert!(notes[0].pinned);
    }

    #[tokio::test]
    async fn active_listing_puts_pinned_notes_first() {
        let (server, _db) = setup();
        for (title, pinned) in [("pinned", true), ("plain", false), ("newest", false)] {
            server
                .post("/notes")
                .json(&json!({"title": title, "content": "", "pinned": pinned, "archived": false}))
                .await
                .assert_status_ok();
        }

        let titles: Vec<String> = server
            .get("/notes")
            .await
            .json::<Vec<Note>>()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["pinned", "newest", "plain"]);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let (server, db) = setup();
        let note = db
            .create_note(crate::models::CreateNoteInput::new("old", "old body"))
            .unwrap();

        server
            .put(&format!("/notes/{}", note.id))
            .json(&json!({"title": "new", "content": "new body", "pinned": true}))
            .await
            .assert_text("Note updated");

        let stored: Note = server.get(&format!("/notes/{}", note.id)).await.json();
        assert_eq!(stored.title, "new");
        assert_eq!(stored.content, "new body");
        assert!(stored.pinned);
    }

    #[tokio::test]
    async fn mutations_on_missing_note_still_acknowledge() {
        let (server, _db) = setup();

        server
            .put("/notes/999")
            .json(&json!({"title": "x", "content": "", "pinned": false}))
            .await
            .assert_status_ok();
        server.put("/notes/archive/999").await.assert_status_ok();
        server.delete("/notes/999").await.assert_text("Note deleted");
    }

    #[tokio::test]
    async fn archive_and_unarchive_move_note_between_listings() {
        let (server, db) = setup();
        let note = db
            .create_note(crate::models::CreateNoteInput::new("Groceries", "milk"))
            .unwrap();

        server
            .put(&format!("/notes/archive/{}", note.id))
            .await
            .assert_text("Note archived");
        assert!(server.get("/notes").await.json::<Vec<Note>>().is_empty());
        let archived: Vec<Note> = server.get("/notes/archived").await.json();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].content, "milk");

        server
            .put(&format!("/notes/unarchive/{}", note.id))
            .await
            .assert_text("Note unarchived");
        assert!(server.get("/notes/archived").await.json::<Vec<Note>>().is_empty());
        assert_eq!(server.get("/notes").await.json::<Vec<Note>>().len(), 1);
    }

    #[tokio::test]
    async fn delete_twice_acknowledges_both_times() {
        let (server, db) = setup();
        let note = db
            .create_note(crate::models::CreateNoteInput::new("gone", ""))
            .unwrap();

        server.delete(&format!("/notes/{}", note.id)).await.assert_status_ok();
        server.delete(&format!("/notes/{}", note.id)).await.assert_status_ok();
        server
            .get(&format!("/notes/{}", note.id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failure_is_a_500_with_driver_message() {
        // Unmigrated database: every statement fails.
        let db = Database::open_memory().unwrap();
        let server = TestServer::new(create_router(db)).unwrap();

        let response = server.get("/notes").expect_failure().await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("no such table"));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (server, _db) = setup();

        let response = server
            .post("/notes")
            .json(&json!({"content": "no title"}))
            .expect_failure()
            .await;
        assert!(response.status_code().is_client_error());
    }
}
