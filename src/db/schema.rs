/// Schema for a freshly created notes database.
///
/// Applied once, when the database file does not exist yet. There is no
/// `IF NOT EXISTS` and no migration path: an existing file is used as-is.
pub const INITIAL_SCHEMA: &str = r#"
BEGIN;

-- Notes: id is supplied by the caller, never auto-assigned
CREATE TABLE notes (
    id INTEGER PRIMARY KEY,
    content TEXT
);

-- Tags: one record per assignment, ids are never reused
CREATE TABLE tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value TEXT NOT NULL
);

-- Junction table: no primary key, no uniqueness, no foreign keys
CREATE TABLE links (
    note_id INTEGER NOT NULL,
    tag_id INTEGER NOT NULL
);

COMMIT;
"#;
