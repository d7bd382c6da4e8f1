//! Error types for depcycles operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::EntityId;

/// The error type for depcycles operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input file could not be opened or read.
    #[error("Error reading data file {}: {source}", path.display())]
    Input {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The edge list could not be read.
    #[error(transparent)]
    Format(#[from] depcycles_edges::Error),

    /// An entity was appended to a chain whose tail does not depend on it.
    ///
    /// The search never builds such a chain, so this signals a bug rather
    /// than bad input.
    #[error("Entity {entity} can't follow chain {chain}")]
    ChainExtension {
        /// The rejected entity.
        entity: EntityId,
        /// The chain it was appended to, rendered as `[a, b, c]`.
        chain: String,
    },

    /// A chain outgrew the search's safety limit without closing or dead-ending.
    ///
    /// Dense graphs can yield chains that never trip the sub-cycle check.
    /// An explicit length cap turns this into a truncated result instead.
    #[error("Chain {chain} reached the search limit of {limit} entities; rerun with --max-chain-len for a partial result")]
    SearchLimit {
        /// Chain length that was reached.
        limit: usize,
        /// The offending chain, rendered as `[a, b, c]`.
        chain: String,
    },

    /// Invalid command-line arguments.
    #[error("Argument error: {0}")]
    Argument(String),
}

/// A specialized Result type for depcycles operations.
pub type Result<T> = std::result::Result<T, Error>;
