//! Command dispatch shared by the CLI subcommands and the stdin protocol.
//!
//! The protocol reads pairs of lines: a command name, then its argument.
//! Each command runs in its own storage session.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::{
    NoteAttrs, NoteId, NoteService,
    error::{NotesError, Result},
    search::SearchCriteria,
    service::with_session,
};

/// Separator between ids in search output.
pub const ID_SEPARATOR: &str = ", ";

/// The closed set of commands understood by the front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Upsert a note from a JSON payload
    Create,
    /// Same operation as `Create`
    Update,
    /// Delete a note by id
    Delete,
    /// Print ids of notes matching a criteria string
    Search,
    /// Print every note as a JSON line
    Notes,
    /// Print every tag record as a JSON line
    Tags,
}

type Handler = fn(&NoteService, &str, &mut dyn Write) -> Result<()>;

impl Command {
    pub const ALL: [Command; 6] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Search,
        Self::Notes,
        Self::Tags,
    ];

    /// Lowercase name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Search => "search",
            Self::Notes => "notes",
            Self::Tags => "tags",
        }
    }

    fn handler(self) -> Handler {
        match self {
            Self::Create | Self::Update => upsert,
            Self::Delete => delete,
            Self::Search => search,
            Self::Notes => notes,
            Self::Tags => tags,
        }
    }

    /// Runs the command against an open session, writing results to `out`.
    pub fn execute(self, service: &NoteService, argument: &str, out: &mut dyn Write) -> Result<()> {
        debug!(command = self.name(), "Executing command");
        (self.handler())(service, argument, out)
    }
}

impl FromStr for Command {
    type Err = NotesError;

    /// Command names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| NotesError::UnknownCommand(name.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn upsert(service: &NoteService, argument: &str, _out: &mut dyn Write) -> Result<()> {
    let attrs = NoteAttrs::from_json(argument)?;
    service.upsert(&attrs)?;
    Ok(())
}

fn delete(service: &NoteService, argument: &str, _out: &mut dyn Write) -> Result<()> {
    service.delete_note(parse_note_id(argument)?)
}

fn search(service: &NoteService, argument: &str, out: &mut dyn Write) -> Result<()> {
    let criteria = SearchCriteria::parse(argument)?;
    let ids = service.search(&criteria)?;

    let line = ids
        .iter()
        .map(NoteId::to_string)
        .collect::<Vec<_>>()
        .join(ID_SEPARATOR);
    writeln!(out, "{line}")?;
    Ok(())
}

fn notes(service: &NoteService, _argument: &str, out: &mut dyn Write) -> Result<()> {
    for note in service.list_notes()? {
        let json = serde_json::to_string(&note).map_err(NotesError::Serialization)?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

fn tags(service: &NoteService, _argument: &str, out: &mut dyn Write) -> Result<()> {
    for tag in service.list_tags()? {
        let json = serde_json::to_string(&tag).map_err(NotesError::Serialization)?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

/// Reads a note id from either a bare integer or a JSON note payload.
///
/// # Examples
///
/// ```
/// use notedb::NoteId;
/// use notedb::command::parse_note_id;
///
/// assert_eq!(parse_note_id("42").unwrap(), NoteId::new(42));
/// assert_eq!(parse_note_id(r#"{"id": "42"}"#).unwrap(), NoteId::new(42));
/// ```
pub fn parse_note_id(argument: &str) -> Result<NoteId> {
    let trimmed = argument.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(NoteId::new(id));
    }

    NoteAttrs::from_json(trimmed)?
        .id
        .ok_or(NotesError::MissingField("id"))
}

/// Runs the line protocol until end of input or an empty command line.
///
/// Returns the number of commands executed. The first failing command stops
/// the loop and its error is returned.
pub fn run_protocol<R: BufRead, W: Write>(
    database: &Path,
    mut input: R,
    out: &mut W,
) -> Result<usize> {
    let mut executed = 0;

    loop {
        let Some(name) = read_line(&mut input)? else {
            break;
        };
        if name.is_empty() {
            break;
        }

        let command: Command = name.parse()?;
        let argument = read_line(&mut input)?.unwrap_or_default();

        with_session(database, |service| command.execute(service, &argument, out))?;
        out.flush()?;
        executed += 1;
    }

    debug!(executed, "Protocol input exhausted");
    Ok(executed)
}

/// Reads one line without its trailing line break; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
