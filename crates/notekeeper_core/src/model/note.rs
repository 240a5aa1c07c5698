//! Note domain model.
//!
//! # Responsibility
//! - Define the record stored for every note.
//! - Define the store identifier and its canonical string form.
//! - Provide view-only composites used by page templates.
//!
//! # Invariants
//! - `created_on` is assigned once at creation and never rewritten.
//! - `NoteId` string form is the canonical decimal rendering of a positive
//!   integer; any other spelling does not identify a note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store identifier allocated from a monotonically increasing counter.
///
/// Serialized as its decimal string so templates and URLs see `"1"`, `"2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(u64);

impl NoteId {
    /// Wraps a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected note id spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNoteId(pub String);

impl Display for InvalidNoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid note id: `{}`", self.0)
    }
}

impl Error for InvalidNoteId {}

impl FromStr for NoteId {
    type Err = InvalidNoteId;

    /// Parses an id with exact-key semantics.
    ///
    /// `"01"`, `"+1"` and `"0"` are rejected: none of them can have been
    /// produced by the counter, so they never name a stored note.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let canonical = !value.is_empty()
            && value.bytes().all(|b| b.is_ascii_digit())
            && !value.starts_with('0');
        if !canonical {
            return Err(InvalidNoteId(value.to_string()));
        }
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|_| InvalidNoteId(value.to_string()))
    }
}

impl Serialize for NoteId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single user note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Short heading. No length limit is enforced.
    pub title: String,
    /// Free-form body text.
    pub description: String,
    /// Creation instant in UTC. Serialized as RFC 3339.
    pub created_on: DateTime<Utc>,
}

impl Note {
    /// Creates a note stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_created_on(title, description, Utc::now())
    }

    /// Creates a note with a caller-provided creation instant.
    pub fn with_created_on(
        title: impl Into<String>,
        description: impl Into<String>,
        created_on: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            created_on,
        }
    }

    /// Returns a new value carrying replacement text and the original
    /// creation instant.
    pub fn replaced(&self, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_created_on(title, description, self.created_on)
    }
}

/// One `(id, note)` pair as listed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    pub id: NoteId,
    #[serde(flatten)]
    pub note: Note,
}

/// Edit-form view model: a note plus the id its form actions post to.
///
/// Presentation only; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditView {
    pub id: NoteId,
    #[serde(flatten)]
    pub note: Note,
}

impl From<NoteEntry> for EditView {
    fn from(entry: NoteEntry) -> Self {
        Self {
            id: entry.id,
            note: entry.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteId};

    #[test]
    fn note_id_parses_canonical_decimal_only() {
        assert_eq!("1".parse::<NoteId>().unwrap(), NoteId::new(1));
        assert_eq!("42".parse::<NoteId>().unwrap(), NoteId::new(42));

        for raw in ["", "0", "01", "+1", "-1", " 1", "1a", "abc"] {
            assert!(raw.parse::<NoteId>().is_err(), "`{raw}` should be rejected");
        }
    }

    #[test]
    fn note_id_rejects_overflowing_values() {
        assert!("99999999999999999999999".parse::<NoteId>().is_err());
    }

    #[test]
    fn replaced_keeps_created_on() {
        let original = Note::new("draft", "body");
        let updated = original.replaced("final", "new body");
        assert_eq!(updated.title, "final");
        assert_eq!(updated.description, "new body");
        assert_eq!(updated.created_on, original.created_on);
    }
}
