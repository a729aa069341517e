//! Error types for CODEOWNERS document operations.

use thiserror::Error;

/// An error produced while parsing, mutating, or writing a CODEOWNERS
/// document.
#[derive(Debug, Error)]
pub enum Error {
    /// A line could not be parsed. Parsing stops at the first such line;
    /// no partial document is produced.
    #[error("line {line}: unrecognized line: {content:?}")]
    Parse {
        /// The line number where the error occurred (1-based).
        line: usize,
        /// The raw text of the offending line.
        content: String,
    },

    /// A required argument was missing or empty. Raised before any
    /// mutation takes place.
    #[error("{0}")]
    Usage(String),

    /// An underlying I/O failure, surfaced to the caller unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a parse error for the given 1-based line number.
    pub fn parse(line: usize, content: impl Into<String>) -> Self {
        Self::Parse {
            line,
            content: content.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Returns true if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true if this is a usage error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
