//! Unified error handling for sqlpad.
//!
//! This module defines [`SqlpadError`], the single error type returned by the
//! CSV import translator, the database engine seam and the playground
//! session. The highlighter has no error cases and never produces one.
//!
//! A convenience [`Result<T>`] type alias is re-exported so that callers can
//! write `Result<T>` instead of `std::result::Result<T, SqlpadError>`.

use std::fmt;
use std::io;

/// The canonical error type for all sqlpad operations.
///
/// Variants are organised by the stage that failed so that callers (the CLI
/// prints them as user-facing messages) can match on the category without
/// inspecting free-form strings.
#[derive(Debug)]
pub enum SqlpadError {
    /// An I/O error while reading an input file.
    Io(io::Error),

    /// The delimited text contained no non-blank lines.
    EmptyInput,

    /// The header line of the delimited text yielded no usable column names.
    InvalidHeader(String),

    /// A table name derived from a file name (or given by the user) is not
    /// usable as an SQL identifier.
    InvalidTableName(String),

    /// The database engine rejected a statement or failed while running it.
    Engine(String),
}

impl fmt::Display for SqlpadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlpadError::Io(err) => write!(f, "I/O error: {err}"),
            SqlpadError::EmptyInput => write!(f, "empty input: no non-blank lines"),
            SqlpadError::InvalidHeader(msg) => write!(f, "invalid header: {msg}"),
            SqlpadError::InvalidTableName(name) => {
                write!(f, "invalid table name: {name:?}")
            }
            SqlpadError::Engine(msg) => write!(f, "SQL error: {msg}"),
        }
    }
}

impl std::error::Error for SqlpadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SqlpadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SqlpadError {
    fn from(err: io::Error) -> Self {
        SqlpadError::Io(err)
    }
}

impl From<rusqlite::Error> for SqlpadError {
    fn from(err: rusqlite::Error) -> Self {
        SqlpadError::Engine(err.to_string())
    }
}

/// A specialised [`Result`] type for sqlpad operations.
pub type Result<T> = std::result::Result<T, SqlpadError>;
