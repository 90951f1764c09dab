//! Social content subsystem.
//!
//! # Data Flow
//! ```text
//! Route variant
//!     → content.rs (head metadata dispatch)  → SocialContent
//!     → card.rs    (image dispatch)          → SocialCard
//!         → svg.rs (encode)                  → SVG document
//!
//! Shared: text.rs (truncation, dates, handles)
//!         status.rs (status → label/color table)
//!         theme.rs (palette and sizing constants)
//! ```
//!
//! # Design Decisions
//! - Both dispatchers match exhaustively on `Route`; there is no handler
//!   registry to fall out of sync
//! - Fetch-then-build: builders are pure so tests need no network
//! - Every failure path lands on the configured default content

pub mod card;
pub mod content;
pub mod status;
pub mod svg;
pub mod text;
pub mod theme;

pub use card::{resolve_card, SocialCard};
pub use content::{resolve_content, SocialContent};
