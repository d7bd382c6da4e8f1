//! Reader for dependency edge lists.
//!
//! Input is a stream of whitespace-separated integers read in pairs
//! `(entity, dependency)`, meaning "`entity` depends on `dependency`".
//! A pair may be split across lines.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;

pub use error::{Error, Result};
pub use reader::{parse_edges, Edge, EdgeReader};
