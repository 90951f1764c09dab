//! Edge service for a code-hosting site's social previews.
//!
//! Sits in front of the single-page application and makes its pages legible
//! to link unfurlers: every page request gets its `<head>` rewritten with
//! per-URL metadata, and `/social-image` renders a preview card for any page
//! path. Content comes from the site's REST API; every failed lookup
//! degrades to fixed default content.

pub mod api;
pub mod config;
pub mod http;
pub mod observability;
pub mod routing;
pub mod social;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use routing::{parse_path, Route};
