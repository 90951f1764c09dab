//! Head-template substitution.
//!
//! # Responsibilities
//! - Hold the fixed `<head>` fragment with its placeholder tokens
//! - Substitute resolved content into the fragment
//! - Swap the fragment into an upstream page at the social marker
//!
//! # Design Decisions
//! - Literal substring replacement, not a DOM-aware rewrite; the marker is
//!   emitted by the application shell precisely so the edge can find it
//! - Substituted values are attribute-escaped; remote entities control them

use crate::social::SocialContent;

/// Placeholder the application shell ships in its `<head>`.
pub const SOCIAL_MARKER: &str = r#"<meta name="social" content="content"/>"#;

const HEAD_TEMPLATE: &str = r#"<title>{{TITLE}}</title>
    <meta name="description" content="{{DESCRIPTION}}" />
    <meta property="og:title" content="{{TITLE}}" />
    <meta property="og:description" content="{{DESCRIPTION}}" />
    <meta property="og:image" content="{{IMAGE_URL}}" />
    <meta property="og:url" content="{{URL}}" />
    <link rel="canonical" href="{{URL}}" />"#;

/// Render the head fragment for resolved content.
pub fn render_head(content: &SocialContent) -> String {
    HEAD_TEMPLATE
        .replace("{{TITLE}}", &attr_escape(&content.title))
        .replace("{{DESCRIPTION}}", &attr_escape(&content.description))
        .replace("{{IMAGE_URL}}", &attr_escape(&content.image_url))
        .replace("{{URL}}", &attr_escape(&content.url))
}

/// Replace the social marker in `page` with the rendered head fragment.
/// Pages without the marker pass through untouched.
pub fn inject_social_content(page: &str, content: &SocialContent) -> String {
    page.replacen(SOCIAL_MARKER, &render_head(content), 1)
}

fn attr_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
