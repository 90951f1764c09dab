//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, surface dispatch)
//!     → request.rs (request ID)
//!     → routing + social (resolve content)
//!     → html.rs (head substitution) | svg encoding
//!     → Send to client
//! ```

pub mod html;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
