mod ids;
mod link;
mod note;
mod note_attrs;
mod tag;

pub use ids::{NoteId, TagId};
pub use link::Link;
pub use note::Note;
pub use note_attrs::NoteAttrs;
pub use tag::Tag;
