use serde::{Deserialize, Deserializer};

use super::NoteId;
use crate::error::{NotesError, Result};

/// Attributes supplied for a note upsert.
///
/// Every field distinguishes "not supplied" (`None`) from "supplied as empty"
/// (`Some("")`, `Some(vec![])`). Absent fields leave stored state untouched.
///
/// # Examples
///
/// ```
/// use notedb::{NoteAttrs, NoteId};
///
/// let attrs = NoteAttrs::new(NoteId::new(1))
///     .content("Hello World")
///     .tags(["alfa", "bravo"]);
///
/// assert_eq!(attrs.id, Some(NoteId::new(1)));
/// assert_eq!(attrs.tags.as_deref().map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteAttrs {
    /// Required by upsert; `None` only when a payload omitted it.
    #[serde(default, deserialize_with = "deserialize_note_id")]
    pub id: Option<NoteId>,

    #[serde(default)]
    pub content: Option<String>,

    /// Replacement tag set. `Some(vec![])` clears every tag.
    #[serde(default, alias = "tag")]
    pub tags: Option<Vec<String>>,
}

impl NoteAttrs {
    /// Creates attributes carrying only an id.
    pub fn new(id: NoteId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Sets the content to store.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the replacement tag set.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Decodes a JSON note payload.
    ///
    /// The id may be an integer or a numeric string. `tag` is accepted as an
    /// alias of `tags`, and `null` is read as "not supplied".
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::{NoteAttrs, NoteId};
    ///
    /// let attrs = NoteAttrs::from_json(r#"{"id": "123", "tag": ["foo"]}"#).unwrap();
    /// assert_eq!(attrs.id, Some(NoteId::new(123)));
    /// assert_eq!(attrs.content, None);
    /// assert_eq!(attrs.tags, Some(vec!["foo".to_string()]));
    /// ```
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(NotesError::InvalidPayload)
    }
}

/// Ids arrive either as JSON numbers or as strings of digits.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn deserialize_note_id<'de, D>(deserializer: D) -> std::result::Result<Option<NoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(NoteId::new(id))),
        Some(RawId::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(|id| Some(NoteId::new(id)))
            .map_err(|_| serde::de::Error::custom(format!("id is not an integer: {text:?}"))),
    }
}
