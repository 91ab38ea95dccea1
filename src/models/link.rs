use serde::{Deserialize, Serialize};

use super::{NoteId, TagId};

/// A row of the `links` junction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub note_id: NoteId,
    pub tag_id: TagId,
}
