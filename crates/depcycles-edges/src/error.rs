//! Error types for depcycles-edges operations.

use std::io;
use thiserror::Error;

/// The error type for depcycles-edges operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A token that is not an integer identifier.
    #[error("Invalid edge format at line {line}: expected an integer, found '{token}'")]
    InvalidToken {
        /// Line the token was read from (1-based).
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The stream ended in the middle of a pair.
    #[error("Invalid edge format at line {line}: entity {id} has no dependency paired with it")]
    UnpairedId {
        /// Line the dangling identifier was read from (1-based).
        line: usize,
        /// The dangling identifier.
        id: i64,
    },
}

impl Error {
    /// Returns `true` if the input itself is malformed, as opposed to an I/O failure.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidToken { .. } | Self::UnpairedId { .. })
    }
}

/// A specialized Result type for depcycles-edges operations.
pub type Result<T> = std::result::Result<T, Error>;
