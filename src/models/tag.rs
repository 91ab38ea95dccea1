use serde::{Deserialize, Serialize};

use super::TagId;

/// A tag record.
///
/// Tag records are created once per assignment: two notes tagged "alfa" own
/// two distinct records with the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    value: String,
}

impl Tag {
    /// Creates a tag value.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::{Tag, TagId};
    ///
    /// let tag = Tag::new(TagId::new(1), "rust");
    /// assert_eq!(tag.id(), TagId::new(1));
    /// assert_eq!(tag.value(), "rust");
    /// ```
    pub fn new(id: TagId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    /// Returns the tag's surrogate identifier.
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag text.
    pub fn value(&self) -> &str {
        &self.value
    }
}
