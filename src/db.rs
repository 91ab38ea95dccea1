mod schema;

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::Result;
use schema::INITIAL_SCHEMA;

/// A storage session holding one SQLite connection.
///
/// The connection is released when the `Database` is dropped, so every exit
/// path (including early `?` returns) closes it. Use [`Database::close`] to
/// observe close errors explicitly.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens an in-memory SQLite database.
    ///
    /// The schema is always created, since an in-memory database starts empty.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a file-based SQLite database at the given path.
    ///
    /// When the file does not exist it is created and the schema is defined.
    /// An existing file is used as-is, without validating its structure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_new = !path.exists();

        debug!(path = %path.display(), is_new, "Opening notes database");
        let conn = Connection::open(path)?;
        let db = Self { conn };

        if is_new {
            db.initialize_schema()?;
            info!(path = %path.display(), "Created notes database");
        }

        Ok(db)
    }

    /// Defines the notes, tags and links tables in a single transaction.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(INITIAL_SCHEMA)?;
        Ok(())
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the session, reporting any error SQLite raises while closing.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}
