use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notedb::{Command, Config, NotesError, command::run_protocol, with_session};
use tracing_subscriber::EnvFilter;

/// notedb - tagged notes with term and tag search
#[derive(Parser)]
#[command(name = "notedb")]
#[command(about = "Store short tagged notes and search them by content and tag")]
#[command(version)]
struct Cli {
    /// Database file (defaults to $NOTEDB_PATH, then ./notes.db)
    #[arg(short, long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Create or merge a note from a JSON payload
    Create {
        /// e.g. {"id": 1, "content": "Hello", "tags": ["alfa"]}
        #[arg(value_name = "PAYLOAD")]
        payload: String,
    },
    /// Same as create: merge a JSON payload into an existing note
    Update {
        #[arg(value_name = "PAYLOAD")]
        payload: String,
    },
    /// Delete a note by id (bare integer or JSON payload)
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Print ids of matching notes; prefix tag filters with `tag:`, end a token with `*` for prefix matching
    Search {
        #[arg(value_name = "QUERY", num_args = 1.., required = true)]
        query: Vec<String>,
    },
    /// Print every note as a JSON line
    Notes,
    /// Print every tag record as a JSON line
    Tags,
    /// Read command/argument line pairs from stdin (the default)
    Serve,
}

impl Commands {
    /// Maps a subcommand onto the shared command set and its argument.
    fn into_command(self) -> Option<(Command, String)> {
        match self {
            Self::Create { payload } => Some((Command::Create, payload)),
            Self::Update { payload } => Some((Command::Update, payload)),
            Self::Delete { id } => Some((Command::Delete, id)),
            Self::Search { query } => Some((Command::Search, query.join(" "))),
            Self::Notes => Some((Command::Notes, String::new())),
            Self::Tags => Some((Command::Tags, String::new())),
            Self::Serve => None,
        }
    }
}

fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are bad payloads, missing ids, empty queries and unknown
/// commands. Storage and I/O failures are internal errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<NotesError>()
        .is_some_and(NotesError::is_user_error)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.database);
    config.ensure_database_directory()?;
    let path = config.database_path();

    match cli.command.and_then(Commands::into_command) {
        Some((command, argument)) => {
            let mut stdout = io::stdout().lock();
            with_session(path, |service| command.execute(service, &argument, &mut stdout))
                .with_context(|| format!("Failed to run {command}"))?;
        }
        None => {
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            run_protocol(path, stdin, &mut stdout).context("Failed to process input")?;
        }
    }

    Ok(())
}
