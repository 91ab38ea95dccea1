//! Two-phase note matching.
//!
//! Candidates are first narrowed with substring `LIKE` queries, then each
//! candidate is confirmed in memory with the tokens' boundary patterns.

mod criteria;
mod token;

use std::collections::HashSet;

use rusqlite::{Connection, params_from_iter};
use tracing::debug;

pub use criteria::{SearchCriteria, TAG_PREFIX};
pub use token::{LIKE_ESCAPE, WildcardToken};

use crate::error::{NotesError, Result};
use crate::models::NoteId;

/// Returns the ids of notes matching every term and every tag filter.
///
/// With only terms (or only tags) the result is that filter's match set; with
/// both it is their intersection. Ids are returned in ascending order.
///
/// # Errors
///
/// Fails with [`NotesError::InvalidQuery`] when both slices are empty.
pub fn match_notes(
    conn: &Connection,
    terms: &[WildcardToken],
    tags: &[WildcardToken],
) -> Result<Vec<NoteId>> {
    match (terms.is_empty(), tags.is_empty()) {
        (true, true) => Err(NotesError::InvalidQuery(
            "at least one search term or tag filter is required".to_string(),
        )),
        (false, true) => match_terms(conn, terms),
        (true, false) => match_tags(conn, tags),
        (false, false) => {
            let tagged: HashSet<NoteId> = match_tags(conn, tags)?.into_iter().collect();
            let mut ids = match_terms(conn, terms)?;
            ids.retain(|id| tagged.contains(id));
            Ok(ids)
        }
    }
}

/// Notes whose content confirms every term.
fn match_terms(conn: &Connection, terms: &[WildcardToken]) -> Result<Vec<NoteId>> {
    // Coarse: every root must be a substring of the content (AND)
    let conditions = vec![like_condition("content"); terms.len()].join(" AND ");
    let sql = format!("SELECT id, content FROM notes WHERE {conditions} ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params_from_iter(terms.iter().map(WildcardToken::like_pattern)),
        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?)),
    )?;

    let mut candidates = 0;
    let mut ids = Vec::new();
    for row_result in rows {
        let (id, content) = row_result?;
        candidates += 1;

        let content = content.unwrap_or_default();
        if terms.iter().all(|term| term.confirms(&content)) {
            ids.push(NoteId::new(id));
        }
    }

    debug!(candidates, matched = ids.len(), "Matched content terms");
    Ok(ids)
}

/// Notes whose joined tag values confirm every tag filter.
fn match_tags(conn: &Connection, tags: &[WildcardToken]) -> Result<Vec<NoteId>> {
    // Coarse: any linked tag containing any root (OR)
    let conditions = vec![like_condition("t.value"); tags.len()].join(" OR ");
    let sql = format!(
        "SELECT DISTINCT l.note_id
         FROM links l
         JOIN tags t ON t.id = l.tag_id
         WHERE {conditions}
         ORDER BY l.note_id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let candidates = stmt
        .query_map(
            params_from_iter(tags.iter().map(WildcardToken::like_pattern)),
            |row| row.get::<_, i64>(0),
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut values_stmt = conn.prepare(
        "SELECT t.value
         FROM links l
         JOIN tags t ON t.id = l.tag_id
         WHERE l.note_id = ?1
         ORDER BY l.rowid",
    )?;

    let mut ids = Vec::new();
    for &id in &candidates {
        let values = values_stmt
            .query_map([id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let joined = values.join(" ");

        // Precise: recovers AND across filters
        if tags.iter().all(|tag| tag.confirms(&joined)) {
            ids.push(NoteId::new(id));
        }
    }

    debug!(candidates = candidates.len(), matched = ids.len(), "Matched tag filters");
    Ok(ids)
}

fn like_condition(column: &str) -> String {
    format!("{column} LIKE ? ESCAPE '{LIKE_ESCAPE}'")
}
