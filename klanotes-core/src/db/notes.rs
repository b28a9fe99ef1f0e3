use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::models::{CreateNoteInput, Note, Scope, UpdateNoteInput};

const NOTE_COLUMNS: &str = "id, title, content, pinned, archived, created_at, updated_at";

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        pinned: row.get(3)?,
        archived: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl Database {
    /// Insert a note and return it with its assigned id.
    pub fn create_note(&self, input: CreateNoteInput) -> Result<Note> {
        let now = Utc::now();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO notes (title, content, pinned, archived, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![input.title, input.content, input.pinned, input.archived, now],
            )?;
            let id = conn.last_insert_rowid();
            tracing::debug!("Created note {}", id);

            Ok(Note {
                id,
                title: input.title,
                content: input.content,
                pinned: input.pinned,
                archived: input.archived,
                created_at: now,
                updated_at: now,
            })
        })
    }

    /// List the notes in `scope`.
    ///
    /// Active notes come back pinned first, then newest first. Archived notes
    /// are returned newest first.
    pub fn list_notes(&self, scope: Scope) -> Result<Vec<Note>> {
        let sql = match scope {
            Scope::Active => format!(
                "SELECT {NOTE_COLUMNS} FROM notes WHERE archived = 0 ORDER BY pinned DESC, id DESC"
            ),
            Scope::Archived => {
                format!("SELECT {NOTE_COLUMNS} FROM notes WHERE archived = 1 ORDER BY id DESC")
            }
        };

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let notes = stmt
                .query_map([], row_to_note)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            tracing::debug!("Listed {} {} notes", notes.len(), scope);
            Ok(notes)
        })
    }

    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.with_connection(|conn| {
            let note = conn
                .query_row(
                    &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                    params![id],
                    row_to_note,
                )
                .optional()?;
            Ok(note)
        })
    }

    /// Replace title, content and pinned. Returns `false` if no row has `id`.
    pub fn update_note(&self, id: i64, input: UpdateNoteInput) -> Result<bool> {
        let now = Utc::now();
        let changed = self.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE notes SET title = ?1, content = ?2, pinned = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![input.title, input.content, input.pinned, now, id],
            )?)
        })?;

        if changed == 0 {
            tracing::warn!("Update matched no note with id {}", id);
        }
        Ok(changed > 0)
    }

    pub fn archive_note(&self, id: i64) -> Result<bool> {
        self.set_archived(id, true)
    }

    pub fn unarchive_note(&self, id: i64) -> Result<bool> {
        self.set_archived(id, false)
    }

    fn set_archived(&self, id: i64, archived: bool) -> Result<bool> {
        let changed = self.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE notes SET archived = ?1 WHERE id = ?2",
                params![archived, id],
            )?)
        })?;

        if changed == 0 {
            tracing::warn!("Setting archived={} matched no note with id {}", archived, id);
        }
        Ok(changed > 0)
    }

    /// Remove a note. Returns `false` if it was already gone.
    pub fn delete_note(&self, id: i64) -> Result<bool> {
        let changed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?)
        })?;

        if changed == 0 {
            tracing::debug!("Delete matched no note with id {}", id);
        }
        Ok(changed > 0)
    }
}
