use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flag;

/// A short text note.
///
/// The store assigns `id` on insert and it never changes afterwards. `title`,
/// `content` and `pinned` are replaced together by an update; `archived` is
/// only touched by archive/unarchive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Case-insensitive substring match against the title only.
    ///
    /// An empty query matches every note.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub archived: bool,
}

impl CreateNoteInput {
    /// A fresh note as the editor creates it: unpinned and not archived.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            pinned: false,
            archived: false,
        }
    }
}

/// Full replacement of a note's mutable text fields and pin flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub pinned: bool,
}

impl From<&Note> for UpdateNoteInput {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            pinned: note.pinned,
        }
    }
}
