use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;

use super::Busy;
use crate::client::NoteApi;
use crate::error::{ClientError, Operation, RequestError};
use crate::models::{Note, Scope, UpdateNoteInput};

/// What a plain press on a note card should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// No selection is active: open the editor on this note.
    Open(Note),
    /// Selection mode: the note's selection was toggled instead.
    Toggled,
}

/// Operations a view offers for its scope.
pub fn available_actions(scope: Scope) -> &'static [Operation] {
    match scope {
        Scope::Active => &[Operation::Pin, Operation::Archive, Operation::Delete],
        Scope::Archived => &[Operation::Unarchive, Operation::Delete],
    }
}

/// Stable sort moving pinned notes to the front.
pub fn sort_pinned_first(notes: &mut [Note]) {
    notes.sort_by_key(|note| !note.pinned);
}

#[derive(Debug, Clone, Copy)]
enum BulkAction {
    Archive,
    Unarchive,
    Delete,
}

impl BulkAction {
    fn operation(self) -> Operation {
        match self {
            Self::Archive => Operation::Archive,
            Self::Unarchive => Operation::Unarchive,
            Self::Delete => Operation::Delete,
        }
    }

    async fn send(self, api: &dyn NoteApi, id: i64) -> Result<(), RequestError> {
        match self {
            Self::Archive => api.archive_note(id).await,
            Self::Unarchive => api.unarchive_note(id).await,
            Self::Delete => api.delete_note(id).await,
        }
    }
}

/// Client-side view of one scope of notes.
///
/// Holds the loaded notes, the multi-selection and the search query. The
/// store stays the source of truth: local state changes only after the store
/// acknowledged the corresponding request.
pub struct NoteCollection {
    api: Arc<dyn NoteApi>,
    scope: Scope,
    notes: Vec<Note>,
    selected: BTreeSet<i64>,
    search_query: String,
    refreshing: Busy,
}

impl NoteCollection {
    pub fn new(api: Arc<dyn NoteApi>, scope: Scope) -> Self {
        Self {
            api,
            scope,
            notes: Vec::new(),
            selected: BTreeSet::new(),
            search_query: String::new(),
            refreshing: Busy::default(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// All loaded notes, regardless of the search query.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Selection mode is on while at least one note is selected.
    pub fn in_selection_mode(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.is_set()
    }

    /// Shared handle on the refreshing flag, readable while `load` is pending.
    pub fn refreshing(&self) -> Busy {
        self.refreshing.clone()
    }

    pub fn supports(&self, op: Operation) -> bool {
        available_actions(self.scope).contains(&op)
    }

    fn require(&self, op: Operation) -> Result<(), ClientError> {
        if self.supports(op) {
            Ok(())
        } else {
            Err(ClientError::Unsupported {
                op,
                scope: self.scope,
            })
        }
    }

    /// Fetch this scope's notes from the store, replacing local state.
    ///
    /// Called whenever the view gains focus and on pull-to-refresh. Clears the
    /// selection on success; on failure local state is left untouched.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let guard = self.refreshing.start();
        let result = self.api.list_notes(self.scope).await;
        drop(guard);

        let mut notes = result.map_err(|err| {
            tracing::warn!("Loading {} notes failed: {}", self.scope, err);
            ClientError::request(Operation::Load)(err)
        })?;

        let scope = self.scope;
        notes.retain(|note| scope.includes(note));
        if scope == Scope::Active {
            sort_pinned_first(&mut notes);
        }

        tracing::debug!("Loaded {} {} notes", notes.len(), scope);
        self.notes = notes;
        self.selected.clear();
        Ok(())
    }

    /// Flip a note's pin flag in the store, then locally.
    pub async fn toggle_pin(&mut self, id: i64) -> Result<(), ClientError> {
        self.require(Operation::Pin)?;
        let note = self.note(id).ok_or(ClientError::NotLoaded(id))?;

        let mut input = UpdateNoteInput::from(note);
        input.pinned = !note.pinned;

        self.api.update_note(id, &input).await.map_err(|err| {
            tracing::warn!("Toggling pin of note {} failed: {}", id, err);
            ClientError::request(Operation::Pin)(err)
        })?;

        if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
            note.pinned = input.pinned;
        }
        sort_pinned_first(&mut self.notes);
        Ok(())
    }

    pub fn toggle_select(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn cancel_selection(&mut self) {
        self.selected.clear();
    }

    /// A tap on a note card.
    pub fn press(&mut self, id: i64) -> Result<PressOutcome, ClientError> {
        let note = self.note(id).ok_or(ClientError::NotLoaded(id))?;

        if self.in_selection_mode() {
            self.toggle_select(id);
            Ok(PressOutcome::Toggled)
        } else {
            Ok(PressOutcome::Open(note.clone()))
        }
    }

    /// A long press always toggles selection.
    pub fn long_press(&mut self, id: i64) {
        self.toggle_select(id);
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Notes whose title contains the search query, in display order.
    pub fn visible(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note.title_matches(&self.search_query))
            .collect()
    }

    pub async fn bulk_delete(&mut self, ids: &[i64]) -> Result<(), ClientError> {
        self.run_bulk(BulkAction::Delete, ids).await
    }

    pub async fn bulk_archive(&mut self, ids: &[i64]) -> Result<(), ClientError> {
        self.run_bulk(BulkAction::Archive, ids).await
    }

    pub async fn bulk_unarchive(&mut self, ids: &[i64]) -> Result<(), ClientError> {
        self.run_bulk(BulkAction::Unarchive, ids).await
    }

    pub async fn delete_selected(&mut self) -> Result<(), ClientError> {
        let ids = self.selected_ids();
        self.bulk_delete(&ids).await
    }

    pub async fn archive_selected(&mut self) -> Result<(), ClientError> {
        let ids = self.selected_ids();
        self.bulk_archive(&ids).await
    }

    pub async fn unarchive_selected(&mut self) -> Result<(), ClientError> {
        let ids = self.selected_ids();
        self.bulk_unarchive(&ids).await
    }

    /// Send one request per id concurrently and wait for all of them.
    ///
    /// Every id whose request succeeded leaves the local list and the
    /// selection. Failed ids stay put (and stay selected) and are reported in
    /// [`ClientError::Partial`].
    async fn run_bulk(&mut self, action: BulkAction, ids: &[i64]) -> Result<(), ClientError> {
        let op = action.operation();
        self.require(op)?;

        let ids: BTreeSet<i64> = ids.iter().copied().collect();
        let api = self.api.as_ref();
        let results = join_all(ids.iter().map(|&id| async move {
            (id, action.send(api, id).await)
        }))
        .await;

        let mut done = BTreeSet::new();
        let mut failed = Vec::new();
        for (id, result) in results {
            match result {
                Ok(()) => {
                    done.insert(id);
                }
                Err(err) => {
                    tracing::warn!("{} of note {} failed: {}", op, id, err);
                    failed.push((id, err));
                }
            }
        }

        self.notes.retain(|note| !done.contains(&note.id));
        self.selected.retain(|id| !done.contains(id));
        tracing::debug!("{} applied to {} note(s)", op, done.len());

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Partial { op, failed })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: i64, pinned: bool) -> Note {
        let now = Utc::now();
        Note {
            id,
            title: format!("note {}", id),
            content: String::new(),
            pinned,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pinned_sort_is_stable() {
        let mut notes = vec![note(5, false), note(4, true), note(3, false), note(2, true)];
        sort_pinned_first(&mut notes);
        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![4, 2, 5, 3]);
    }

    #[test]
    fn archived_scope_offers_no_pin_or_archive() {
        let actions = available_actions(Scope::Archived);
        assert!(!actions.contains(&Operation::Pin));
        assert!(!actions.contains(&Operation::Archive));
        assert!(actions.contains(&Operation::Unarchive));
        assert!(actions.contains(&Operation::Delete));
    }

    #[test]
    fn active_scope_offers_no_unarchive() {
        let actions = available_actions(Scope::Active);
        assert!(!actions.contains(&Operation::Unarchive));
        assert!(actions.contains(&Operation::Pin));
    }
}
