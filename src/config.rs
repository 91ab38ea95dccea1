//! Runtime configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable naming the database file.
pub const DATABASE_ENV: &str = "NOTEDB_PATH";

/// Database file used when nothing else is configured, relative to the
/// working directory.
pub const DEFAULT_DATABASE_FILE: &str = "notes.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    /// Resolves configuration from the command line and the environment.
    ///
    /// Precedence: explicit path, then `NOTEDB_PATH`, then `notes.db`.
    /// Empty values are ignored.
    pub fn resolve(cli_path: Option<PathBuf>) -> Self {
        let database_path = cli_path
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| {
                std::env::var_os(DATABASE_ENV)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE));

        Self { database_path }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Ensures the parent directory of the database file exists.
    ///
    /// Creates the directory structure if it doesn't exist using `create_dir_all`.
    pub fn ensure_database_directory(&self) -> Result<()> {
        if let Some(parent) = self.database_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
        Ok(())
    }
}
