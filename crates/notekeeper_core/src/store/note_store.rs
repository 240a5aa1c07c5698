//! Note store contract and in-memory implementation.
//!
//! # Responsibility
//! - Allocate note ids from a monotonically increasing counter.
//! - Provide create/get/replace/delete/list over an in-process map.
//!
//! # Invariants
//! - Ids are never reused, even after the note they named is deleted.
//! - `replace` and `delete` leave the store untouched on `NotFound`.
//! - `list` yields entries in ascending id (insertion) order.
//! - Map and counter are guarded by one mutex; the lock is held for a single
//!   operation only.

use crate::model::note::{Note, NoteEntry, NoteId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No note is stored under the id.
    NotFound(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Keyed note storage.
pub trait NoteStore: Send + Sync {
    /// Allocates the next id, stamps `created_on = now` and inserts the note.
    fn create(&self, title: &str, description: &str) -> NoteId;
    /// Gets one note by exact id.
    fn get(&self, id: NoteId) -> StoreResult<Note>;
    /// Replaces title and description of an existing note as one value.
    fn replace(&self, id: NoteId, title: &str, description: &str) -> StoreResult<()>;
    /// Removes one note.
    fn delete(&self, id: NoteId) -> StoreResult<()>;
    /// Returns every stored note in ascending id order.
    fn list(&self) -> Vec<NoteEntry>;
    /// Returns the number of stored notes.
    fn len(&self) -> usize;

    /// Returns whether the store holds no notes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct StoreState {
    last_id: u64,
    notes: BTreeMap<NoteId, Note>,
}

/// Process-memory note store.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    state: Mutex<StoreState>,
}

impl MemoryNoteStore {
    /// Creates an empty store whose first id will be `1`.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        // No operation can panic while the state is half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteStore for MemoryNoteStore {
    fn create(&self, title: &str, description: &str) -> NoteId {
        let mut state = self.state();
        state.last_id += 1;
        let id = NoteId::new(state.last_id);
        state.notes.insert(id, Note::new(title, description));
        id
    }

    fn get(&self, id: NoteId) -> StoreResult<Note> {
        self.state()
            .notes
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn replace(&self, id: NoteId, title: &str, description: &str) -> StoreResult<()> {
        let mut state = self.state();
        let current = state.notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *current = current.replaced(title, description);
        Ok(())
    }

    fn delete(&self, id: NoteId) -> StoreResult<()> {
        self.state()
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> Vec<NoteEntry> {
        self.state()
            .notes
            .iter()
            .map(|(id, note)| NoteEntry {
                id: *id,
                note: note.clone(),
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.state().notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryNoteStore, NoteStore};
    use crate::model::note::NoteId;

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryNoteStore::new();
        let first = store.create("a", "");
        store.delete(first).unwrap();
        let second = store.create("b", "");
        assert_eq!(first, NoteId::new(1));
        assert_eq!(second, NoteId::new(2));
        assert_eq!(store.len(), 1);
    }
}
