//! Remote API subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher (route variant)
//!     → client.rs (URL building, GET with timeout)
//!     → types.rs (serde wire types)
//!     → Ok(entity) | Err(status + body)
//! ```
//!
//! # Design Decisions
//! - Read-only: every call is a GET against a fixed base host
//! - Errors are data, not control flow; dispatchers decide the fallback
//! - One shared connection pool per process

pub mod client;
pub mod types;

pub use client::ShareApiClient;
pub use types::{ApiError, ApiResult};
