/// Integration tests for the line protocol read by `notedb serve`.
use std::io::Cursor;

use anyhow::Result;
use notedb::command::run_protocol;
use notedb::{NoteId, with_session};
use tempfile::tempdir;

fn run(path: &std::path::Path, lines: &[&str]) -> Result<String> {
    let input = lines.iter().map(|line| format!("{line}\n")).collect::<String>();
    let mut out = Vec::new();
    run_protocol(path, Cursor::new(input), &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn protocol_creates_and_searches() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("notes.db");

    let output = run(
        &path,
        &[
            "create",
            r#"{"id": "1", "tags": ["potato"]}"#,
            "create",
            r#"{"id": "2", "tags": ["pot", "dinner"]}"#,
            "create",
            r#"{"id": "3", "tags": ["pancake"]}"#,
            "search",
            "tag:pot*",
        ],
    )?;

    assert_eq!(output, "1, 2\n");
    Ok(())
}

#[test]
fn protocol_update_and_delete() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("notes.db");

    run(
        &path,
        &[
            "create",
            r#"{"id": "123", "content": "does not matter"}"#,
            "UPDATE",
            r#"{"id": "123", "content": "expected"}"#,
            "create",
            r#"{"id": "7", "content": "short lived"}"#,
            "delete",
            "7",
        ],
    )?;

    let notes = with_session(&path, |service| service.list_notes())?;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id(), NoteId::new(123));
    assert_eq!(notes[0].content(), "expected");
    Ok(())
}

#[test]
fn protocol_lists_rows() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("notes.db");

    let output = run(
        &path,
        &[
            "create",
            r#"{"id": 1, "content": "Hello World", "tags": ["alfa"]}"#,
            "notes",
            "",
            "tags",
            "",
        ],
    )?;

    assert_eq!(
        output,
        "{\"id\":1,\"content\":\"Hello World\"}\n{\"id\":1,\"value\":\"alfa\"}\n"
    );
    Ok(())
}

#[test]
fn protocol_stops_on_first_error() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("notes.db");

    let result = run(
        &path,
        &[
            "create",
            r#"{"content": "missing id"}"#,
            "create",
            r#"{"id": 2}"#,
        ],
    );
    assert!(result.is_err());

    let notes = with_session(&path, |service| service.list_notes())?;
    assert!(notes.is_empty());
    Ok(())
}
