use super::Busy;
use crate::client::NoteApi;
use crate::error::{ClientError, Operation};
use crate::models::{CreateNoteInput, Note, UpdateNoteInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Fetch one note, treating an unknown id as [`ClientError::NotFound`].
pub async fn fetch_note(api: &dyn NoteApi, id: i64) -> Result<Note, ClientError> {
    api.get_note(id)
        .await
        .map_err(|err| {
            tracing::warn!("Fetching note {} failed: {}", id, err);
            ClientError::request(Operation::Load)(err)
        })?
        .ok_or(ClientError::NotFound(id))
}

/// Editor for a new note or an existing one.
///
/// A successful save does not merge anything into a [`NoteCollection`]; the
/// caller navigates back and the collection reloads on focus.
///
/// [`NoteCollection`]: super::NoteCollection
#[derive(Debug, Default)]
pub struct NoteEditor {
    editing: Option<Note>,
    title: String,
    content: String,
    saving: Busy,
}

impl NoteEditor {
    pub fn new(editing: Option<Note>) -> Self {
        let (title, content) = editing
            .as_ref()
            .map(|note| (note.title.clone(), note.content.clone()))
            .unwrap_or_default();

        Self {
            editing,
            title,
            content,
            saving: Busy::default(),
        }
    }

    /// Fetch note `id` from the store and open it for editing.
    pub async fn open(api: &dyn NoteApi, id: i64) -> Result<Self, ClientError> {
        fetch_note(api, id).await.map(|note| Self::new(Some(note)))
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Note"
        } else {
            "New Note"
        }
    }

    pub fn editing(&self) -> Option<&Note> {
        self.editing.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Inputs are disabled while a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    /// Shared handle on the saving flag, readable while `save` is pending.
    pub fn saving(&self) -> Busy {
        self.saving.clone()
    }

    /// Create or update the note.
    ///
    /// A blank title is rejected before anything is sent. Updates keep the
    /// note's current pin flag; new notes start unpinned and unarchived.
    pub async fn save(&mut self, api: &dyn NoteApi) -> Result<SaveOutcome, ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("Title cannot be empty".into()));
        }

        let guard = self.saving.start();
        let result = match &self.editing {
            Some(note) => {
                let input = UpdateNoteInput {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    pinned: note.pinned,
                };
                api.update_note(note.id, &input)
                    .await
                    .map(|()| SaveOutcome::Updated)
            }
            None => {
                let input = CreateNoteInput::new(self.title.clone(), self.content.clone());
                api.create_note(&input).await.map(|()| SaveOutcome::Created)
            }
        };
        drop(guard);

        result.map_err(|err| {
            tracing::warn!("Saving note failed: {}", err);
            ClientError::request(Operation::Save)(err)
        })
    }
}
