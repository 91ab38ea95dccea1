pub mod command;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod search;
pub mod service;

pub use command::Command;
pub use config::Config;
pub use db::Database;
pub use error::{NotesError, Result};
pub use models::{Link, Note, NoteAttrs, NoteId, Tag, TagId};
pub use search::{SearchCriteria, WildcardToken};
pub use service::{NoteService, with_session};
