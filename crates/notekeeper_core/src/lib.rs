//! Core domain logic for Notekeeper.
//! This crate owns the note model, the in-memory store and its use-cases.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{EditView, InvalidNoteId, Note, NoteEntry, NoteId};
pub use service::note_service::{NoteService, NoteServiceError};
pub use store::note_store::{MemoryNoteStore, NoteStore, StoreError, StoreResult};
