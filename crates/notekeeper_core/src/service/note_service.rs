//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list APIs keyed by raw id strings.
//! - Build view models (`EditView`) for presentation callers.
//! - Emit one metadata-only log event per mutation.
//!
//! # Invariants
//! - `update_note` uses whole-value replacement semantics.
//! - An id string that cannot name a note behaves exactly like a missing note
//!   for callers that only check `is_not_found`.
//! - Log events never include note title or description text.

use crate::model::note::{EditView, InvalidNoteId, Note, NoteEntry, NoteId};
use crate::store::note_store::{NoteStore, StoreError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    /// No note is stored under the id.
    NoteNotFound(NoteId),
    /// The id string is not a canonical note id.
    InvalidId(String),
}

impl NoteServiceError {
    /// Returns whether this error means "no such note" from a caller's view.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound(_) | Self::InvalidId(_))
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidId(raw) => write!(f, "invalid note id: `{raw}`"),
        }
    }
}

impl Error for NoteServiceError {}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NoteNotFound(id),
        }
    }
}

impl From<InvalidNoteId> for NoteServiceError {
    fn from(value: InvalidNoteId) -> Self {
        Self::InvalidId(value.0)
    }
}

/// Note service facade over store implementations.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates one note and returns its id.
    pub fn create_note(&self, title: &str, description: &str) -> NoteId {
        let id = self.store.create(title, description);
        info!(
            "event=note_create module=service status=ok id={} title_len={} description_len={}",
            id,
            title.chars().count(),
            description.chars().count()
        );
        id
    }

    /// Gets one note by raw id.
    pub fn get_note(&self, raw_id: &str) -> Result<Note, NoteServiceError> {
        let id = parse_id(raw_id)?;
        Ok(self.store.get(id)?)
    }

    /// Builds the edit-form view model for one note.
    pub fn edit_view(&self, raw_id: &str) -> Result<EditView, NoteServiceError> {
        let id = parse_id(raw_id)?;
        match self.store.get(id) {
            Ok(note) => Ok(EditView { id, note }),
            Err(err) => {
                debug!("event=note_edit_view module=service status=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Replaces title and description of an existing note.
    ///
    /// The note keeps its original `created_on`.
    pub fn update_note(
        &self,
        raw_id: &str,
        title: &str,
        description: &str,
    ) -> Result<NoteId, NoteServiceError> {
        let id = parse_id(raw_id)?;
        match self.store.replace(id, title, description) {
            Ok(()) => {
                info!("event=note_update module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                warn!("event=note_update module=service status=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Deletes one note.
    pub fn delete_note(&self, raw_id: &str) -> Result<NoteId, NoteServiceError> {
        let id = parse_id(raw_id)?;
        match self.store.delete(id) {
            Ok(()) => {
                info!(
                    "event=note_delete module=service status=ok id={id} remaining={}",
                    self.store.len()
                );
                Ok(id)
            }
            Err(err) => {
                warn!("event=note_delete module=service status=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Lists every note in ascending id order.
    pub fn list_notes(&self) -> Vec<NoteEntry> {
        self.store.list()
    }
}

fn parse_id(raw_id: &str) -> Result<NoteId, NoteServiceError> {
    raw_id.parse::<NoteId>().map_err(|err| {
        warn!(
            "event=note_id_parse module=service status=error id_len={}",
            raw_id.len()
        );
        NoteServiceError::from(err)
    })
}
