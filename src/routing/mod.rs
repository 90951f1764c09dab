//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! URL path ("/@alice/mylib/tickets/42")
//!     → parser.rs (split, positional analysis)
//!     → route.rs (Route variant with identifiers)
//!     → dispatchers match exhaustively on the variant
//! ```
//!
//! # Design Decisions
//! - Parsing is total: unknown shapes become `NotFound`, never errors
//! - Pure functions over strings; no I/O, no state
//! - Deterministic: exactly one variant matches any given path

pub mod parser;
pub mod route;

pub use parser::parse_path;
pub use route::{BranchRef, DefinitionKind, Route};
