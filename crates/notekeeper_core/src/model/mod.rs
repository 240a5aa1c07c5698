//! Domain model for notes.
//!
//! # Responsibility
//! - Define the canonical note record and its store identifier.
//! - Define presentation composites consumed by the view layer.
//!
//! # Invariants
//! - Every stored note is addressed by exactly one `NoteId`.
//! - A note's creation time never changes after insertion.

pub mod note;
