use std::path::Path;

use rusqlite::OptionalExtension;
use tracing::debug;

use crate::{
    Database, Link, Note, NoteAttrs, NoteId, Tag, TagId,
    error::{NotesError, Result},
    ledger,
    search::{self, SearchCriteria},
};

/// Service layer providing note storage and search.
///
/// NoteService owns a [`Database`] session. Dropping the service releases the
/// connection.
///
/// # Examples
///
/// ```
/// use notedb::{Database, NoteAttrs, NoteId, NoteService};
///
/// # fn main() -> notedb::Result<()> {
/// let service = NoteService::new(Database::in_memory()?);
/// service.upsert(&NoteAttrs::new(NoteId::new(1)).content("Hello World"))?;
/// assert_eq!(service.list_notes()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct NoteService {
    db: Database,
}

impl NoteService {
    /// Creates a new NoteService with the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    ///
    /// Useful for testing or advanced operations that need direct database access.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Ends the session, closing the connection explicitly.
    pub fn close(self) -> Result<()> {
        self.db.close()
    }

    /// Inserts or merges a note.
    ///
    /// A new note takes the supplied content, or an empty string. An existing
    /// note keeps its content unless content was supplied. When `attrs.tags`
    /// is present (even empty) the note's tag set is replaced; when absent
    /// the current tags are kept. The whole operation is one transaction.
    ///
    /// # Errors
    ///
    /// [`NotesError::MissingField`] if `attrs.id` is absent; nothing is written.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::{Database, NoteAttrs, NoteId, NoteService};
    ///
    /// # fn main() -> notedb::Result<()> {
    /// let service = NoteService::new(Database::in_memory()?);
    ///
    /// service.upsert(&NoteAttrs::new(NoteId::new(123)).content("A"))?;
    /// let note = service.upsert(&NoteAttrs::new(NoteId::new(123)).tags(["x"]))?;
    ///
    /// // Content was not supplied the second time, so it is kept
    /// assert_eq!(note.content(), "A");
    /// # Ok(())
    /// # }
    /// ```
    pub fn upsert(&self, attrs: &NoteAttrs) -> Result<Note> {
        let id = attrs.id.ok_or(NotesError::MissingField("id"))?;
        let tx = self.db.connection().unchecked_transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?1)",
            [id.get()],
            |row| row.get(0),
        )?;

        if !exists {
            let content = attrs.content.as_deref().unwrap_or("");
            tx.execute(
                "INSERT INTO notes (id, content) VALUES (?1, ?2)",
                (id.get(), content),
            )?;
        } else if let Some(content) = &attrs.content {
            tx.execute(
                "UPDATE notes SET content = ?2 WHERE id = ?1",
                (id.get(), content),
            )?;
        }

        if let Some(tags) = &attrs.tags {
            ledger::cleanup(&tx, id)?;
            ledger::assign(&tx, id, tags.as_slice())?;
        }

        let content: Option<String> =
            tx.query_row("SELECT content FROM notes WHERE id = ?1", [id.get()], |row| {
                row.get(0)
            })?;

        tx.commit()?;

        debug!(%id, created = !exists, tags_replaced = attrs.tags.is_some(), "Upserted note");
        Ok(Note::new(id, content.unwrap_or_default()))
    }

    /// Deletes a note together with its links and orphaned tags.
    ///
    /// This operation is idempotent: deleting a non-existent note returns
    /// `Ok(())` without error.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::{Database, NoteAttrs, NoteId, NoteService};
    ///
    /// # fn main() -> notedb::Result<()> {
    /// let service = NoteService::new(Database::in_memory()?);
    /// service.upsert(&NoteAttrs::new(NoteId::new(1)).tags(["doomed"]))?;
    ///
    /// service.delete_note(NoteId::new(1))?;
    /// service.delete_note(NoteId::new(1))?;
    ///
    /// assert!(service.get_note(NoteId::new(1))?.is_none());
    /// assert!(service.list_tags()?.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete_note(&self, id: NoteId) -> Result<()> {
        let tx = self.db.connection().unchecked_transaction()?;

        ledger::cleanup(&tx, id)?;
        let deleted = tx.execute("DELETE FROM notes WHERE id = ?1", [id.get()])?;

        tx.commit()?;

        debug!(%id, deleted, "Deleted note");
        Ok(())
    }

    /// Retrieves a note by its ID.
    ///
    /// Returns `None` if no note exists with the given ID.
    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let content: Option<Option<String>> = self
            .db
            .connection()
            .query_row("SELECT content FROM notes WHERE id = ?1", [id.get()], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(content.map(|content| Note::new(id, content.unwrap_or_default())))
    }

    /// Returns every stored note in rowid order.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT id, content FROM notes ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let content: Option<String> = row.get(1)?;
            Ok(Note::new(NoteId::new(id), content.unwrap_or_default()))
        })?;

        let mut notes = Vec::new();
        for row_result in rows {
            notes.push(row_result?);
        }
        Ok(notes)
    }

    /// Returns every tag record in rowid order.
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT id, value FROM tags ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Tag::new(TagId::new(row.get(0)?), row.get::<_, String>(1)?))
        })?;

        let mut tags = Vec::new();
        for row_result in rows {
            tags.push(row_result?);
        }
        Ok(tags)
    }

    /// Returns every row of the junction table in insertion order.
    pub fn list_links(&self) -> Result<Vec<Link>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT note_id, tag_id FROM links ORDER BY rowid")?;

        let rows = stmt.query_map([], |row| {
            Ok(Link {
                note_id: NoteId::new(row.get(0)?),
                tag_id: TagId::new(row.get(1)?),
            })
        })?;

        let mut links = Vec::new();
        for row_result in rows {
            links.push(row_result?);
        }
        Ok(links)
    }

    /// Returns the tags linked to a note, in assignment order.
    pub fn tags_for_note(&self, id: NoteId) -> Result<Vec<Tag>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT t.id, t.value
             FROM links l
             JOIN tags t ON t.id = l.tag_id
             WHERE l.note_id = ?1
             ORDER BY l.rowid",
        )?;

        let rows = stmt.query_map([id.get()], |row| {
            Ok(Tag::new(TagId::new(row.get(0)?), row.get::<_, String>(1)?))
        })?;

        let mut tags = Vec::new();
        for row_result in rows {
            tags.push(row_result?);
        }
        Ok(tags)
    }

    /// Finds the notes matching the given criteria.
    ///
    /// # Errors
    ///
    /// [`NotesError::InvalidQuery`] when the criteria carry neither terms nor tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::{Database, NoteAttrs, NoteId, NoteService};
    /// use notedb::search::SearchCriteria;
    ///
    /// # fn main() -> notedb::Result<()> {
    /// let service = NoteService::new(Database::in_memory()?);
    /// service.upsert(&NoteAttrs::new(NoteId::new(1)).content("Sweet Potato Pie"))?;
    /// service.upsert(&NoteAttrs::new(NoteId::new(2)).content("Mash four potatoes"))?;
    ///
    /// let ids = service.search(&SearchCriteria::parse("potato")?)?;
    /// assert_eq!(ids, vec![NoteId::new(1)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<NoteId>> {
        search::match_notes(self.db.connection(), &criteria.terms, &criteria.tags)
    }
}

/// Runs `f` against a session on the database at `path`.
///
/// The connection is released on every exit path; on success it is closed
/// explicitly so close errors are reported.
///
/// # Examples
///
/// ```
/// use notedb::{NoteAttrs, NoteId, with_session};
///
/// # fn main() -> notedb::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("notes.db");
///
/// with_session(&path, |service| {
///     service.upsert(&NoteAttrs::new(NoteId::new(1)).content("persisted"))
/// })?;
///
/// let notes = with_session(&path, |service| service.list_notes())?;
/// assert_eq!(notes[0].content(), "persisted");
/// # Ok(())
/// # }
/// ```
pub fn with_session<T, F>(path: impl AsRef<Path>, f: F) -> Result<T>
where
    F: FnOnce(&NoteService) -> Result<T>,
{
    let service = NoteService::new(Database::open(path)?);
    let value = f(&service)?;
    service.close()?;
    Ok(value)
}
