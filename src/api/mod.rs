//! REST interface of the note store.
//!
//! | Method | Path                    | Response                   |
//! |--------|-------------------------|----------------------------|
//! | POST   | `/notes`                | text ack                   |
//! | GET    | `/notes`                | active notes, pinned first |
//! | GET    | `/notes/archived`       | archived notes             |
//! | GET    | `/notes/{id}`           | one note or 404            |
//! | PUT    | `/notes/{id}`           | text ack                   |
//! | DELETE | `/notes/{id}`           | text ack                   |
//! | PUT    | `/notes/archive/{id}`   | text ack                   |
//! | PUT    | `/notes/unarchive/{id}` | text ack                   |
//!
//! Store failures are reported as a plain 500 carrying the driver error.

mod error;
mod notes;

use axum::{
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub use error::ApiError;

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route("/notes", get(notes::list_active).post(notes::create))
        .route("/notes/archived", get(notes::list_archived))
        .route("/notes/archive/{id}", put(notes::archive))
        .route("/notes/unarchive/{id}", put(notes::unarchive))
        .route(
            "/notes/{id}",
            get(notes::get).put(notes::update).delete(notes::delete),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}
