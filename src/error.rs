use thiserror::Error;

/// Errors produced by the notes store and its adapters.
#[derive(Debug, Error)]
pub enum NotesError {
    /// A required attribute was not supplied
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Search criteria that cannot be evaluated
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Malformed note payload
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// Failure encoding a row for output
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Command name outside the supported set
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Any failure reported by SQLite
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Confirmation pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotesError {
    /// Returns true for errors caused by caller input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::InvalidQuery(_)
                | Self::InvalidPayload(_)
                | Self::UnknownCommand(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NotesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_classified() {
        assert!(NotesError::MissingField("id").is_user_error());
        assert!(NotesError::InvalidQuery("empty".into()).is_user_error());
        assert!(NotesError::UnknownCommand("frobnicate".into()).is_user_error());

        let storage = NotesError::Storage(rusqlite::Error::QueryReturnedNoRows);
        assert!(!storage.is_user_error());
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = NotesError::MissingField("id");
        assert_eq!(err.to_string(), "Missing required field: id");
    }
}
