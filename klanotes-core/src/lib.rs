//! Core library for Klanotes.
//!
//! This crate provides the note model and the note store,
//! independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use klanotes_core::db::Database;
//! use klanotes_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! db.create_note(CreateNoteInput::new("Groceries", "milk, eggs"))?;
//! let notes = db.list_notes(Scope::Active)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
