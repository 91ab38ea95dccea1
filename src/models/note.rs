use serde::{Deserialize, Serialize};

use super::NoteId;

/// A stored note as it appears in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    content: String,
}

impl Note {
    /// Creates a note value.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::{Note, NoteId};
    ///
    /// let note = Note::new(NoteId::new(1), "Hello World");
    /// assert_eq!(note.id(), NoteId::new(1));
    /// assert_eq!(note.content(), "Hello World");
    /// ```
    pub fn new(id: NoteId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
