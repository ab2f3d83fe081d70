//! Error types for slimhelp library.

use std::io;
use thiserror::Error;

/// Result type alias for slimhelp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting help documentation.
///
/// Paragraph-level problems (unmatched headings, orphan descriptions) are
/// never errors; they are recorded as [`Diagnostic`](crate::parser::Diagnostic)s.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document kind could not be determined.
    #[error("Unknown document kind: {0}")]
    UnknownKind(String),

    /// A style table override could not be loaded.
    #[error("Invalid style table: {0}")]
    InvalidStyleTable(String),

    /// A configured pattern (e.g. a property separator) does not compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}
