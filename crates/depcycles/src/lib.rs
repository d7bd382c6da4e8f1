//! Depcycles - dependency cycle enumeration.
//!
//! Given a directed graph of "entity depends on entity" edges, this crate
//! finds every cycle, collapsing cycles that are rotations of one another.
//!
//! ```
//! use depcycles::config::ResearchConfig;
//! use depcycles::report::{report_from_str, OutputMode};
//!
//! let report = report_from_str("1 2\n2 3\n3 1\n", ResearchConfig::default(), OutputMode::Text)?;
//! assert_eq!(report, "1 2 3 1 \n");
//! # Ok::<(), depcycles::Error>(())
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod report;
pub mod research;

// Public CLI module (needed by binary)
pub mod cli;

pub use chain::DependencyChain;
pub use domain::{Entity, EntityId, EntityRegistry};
pub use error::{Error, Result};
pub use research::{CycleSearch, DependencyResearcher, SearchStats};
