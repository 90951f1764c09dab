//! Card theme constants.
//!
//! An explicitly constructed, immutable palette; nothing here is mutable at
//! runtime and nothing is loaded lazily.

use crate::social::status::TagColor;

/// Social card pixel dimensions, fixed by the preview-image convention.
pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

/// Base spacing/typography unit. `to_px(4.0)` is the large title size.
pub fn to_px(units: f64) -> f64 {
    units * 16.0
}

pub const FONT_FAMILY: &str = "Inter, 'Helvetica Neue', Arial, sans-serif";
pub const FONT_FAMILY_MONO: &str = "'Fira Code', 'SF Mono', Menlo, monospace";

// Grayscale ladder, darkest to lightest.
pub const GRAY_DARKEN_30: &str = "#21242e";
pub const GRAY_BASE: &str = "#585c6e";
pub const GRAY_LIGHTEN_20: &str = "#8f93a3";
pub const GRAY_LIGHTEN_30: &str = "#aaaeba";
pub const GRAY_LIGHTEN_40: &str = "#ced1da";
pub const GRAY_LIGHTEN_55: &str = "#eceef2";
pub const GRAY_LIGHTEN_100: &str = "#ffffff";

/// Card backdrop behind sheets and icon pages.
pub const BACKDROP: &str = "#46365b";
pub const BACKDROP_ACCENT: &str = "#2c2140";

/// Foreground, fill, and border for a tag of the given color.
pub struct TagPalette {
    pub text: &'static str,
    pub fill: &'static str,
    pub border: &'static str,
}

pub fn tag_palette(color: TagColor) -> TagPalette {
    match color {
        TagColor::Green => TagPalette {
            text: "#146832",
            fill: "#e6f6ec",
            border: "#4cb575",
        },
        TagColor::Blue => TagPalette {
            text: "#144f83",
            fill: "#e7f1fb",
            border: "#5495dc",
        },
        TagColor::Orange => TagPalette {
            text: "#8a4a10",
            fill: "#fdf0e3",
            border: "#e29350",
        },
        TagColor::Purple => TagPalette {
            text: "#5b2f86",
            fill: "#f2eafa",
            border: "#a376d2",
        },
        TagColor::Pink => TagPalette {
            text: "#8c2a5e",
            fill: "#fbeaf3",
            border: "#dc74ab",
        },
        TagColor::Gray => TagPalette {
            text: GRAY_BASE,
            fill: GRAY_LIGHTEN_55,
            border: GRAY_LIGHTEN_40,
        },
    }
}
