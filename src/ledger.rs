//! Maintenance of the note to tag junction.
//!
//! Both functions take a plain connection so callers can run them inside an
//! open transaction (`rusqlite::Transaction` derefs to `Connection`).

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::models::{NoteId, TagId};

/// Detaches every tag from a note and removes tag records left orphaned.
///
/// A tag record is deleted only when the link being removed is the only link
/// referencing it anywhere in the store. Link counts are read before any
/// link is deleted.
pub fn cleanup(conn: &Connection, note_id: NoteId) -> Result<()> {
    let orphaned = conn.execute(
        "DELETE FROM tags
         WHERE id IN (SELECT tag_id FROM links WHERE note_id = ?1)
           AND (SELECT COUNT(*) FROM links l WHERE l.tag_id = tags.id) = 1",
        [note_id.get()],
    )?;

    let unlinked = conn.execute("DELETE FROM links WHERE note_id = ?1", [note_id.get()])?;

    debug!(%note_id, orphaned, unlinked, "Cleaned up note tags");
    Ok(())
}

/// Creates a fresh tag record and link for each value, in order.
///
/// No lookup against existing tags is made; duplicate values produce
/// distinct records.
pub fn assign<S: AsRef<str>>(conn: &Connection, note_id: NoteId, values: &[S]) -> Result<Vec<TagId>> {
    let mut insert_tag = conn.prepare("INSERT INTO tags (value) VALUES (?1)")?;
    let mut insert_link = conn.prepare("INSERT INTO links (note_id, tag_id) VALUES (?1, ?2)")?;

    let mut tag_ids = Vec::with_capacity(values.len());
    for value in values {
        insert_tag.execute([value.as_ref()])?;
        let tag_id = TagId::new(conn.last_insert_rowid());

        insert_link.execute([note_id.get(), tag_id.get()])?;
        tag_ids.push(tag_id);
    }

    debug!(%note_id, count = tag_ids.len(), "Assigned tags");
    Ok(tag_ids)
}
