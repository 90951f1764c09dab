//! SVG encoding of social cards.
//!
//! # Responsibilities
//! - Serialize a `SocialCard` into a self-contained 1200x630 SVG document
//! - Escape all text coming from remote entities
//!
//! # Design Decisions
//! - SVG is built by string assembly, mirroring how the head template is
//!   substituted; there is no retained scene graph
//! - Icons render as glyphs from a fixed table, so the document needs no
//!   external assets beyond the fallback image URL
//! - Row layout approximates text width from character count; rows are short
//!   and pre-truncated, so the error stays within the margins

use std::fmt::Write;

use crate::social::card::{Byline, Icon, SheetCard, SheetItem, SheetSize, SocialCard};
use crate::social::theme::{
    self, tag_palette, to_px, CARD_HEIGHT, CARD_WIDTH, FONT_FAMILY, FONT_FAMILY_MONO,
};

/// Render a card description into a complete SVG document.
pub fn render_card(card: &SocialCard) -> String {
    let mut body = String::new();
    match card {
        SocialCard::Fallback { image_url } => render_fallback(&mut body, image_url),
        SocialCard::Profile {
            title,
            title_px,
            subtitle,
            avatar_url,
        } => render_profile(&mut body, title, *title_px, subtitle, avatar_url.as_deref()),
        SocialCard::IconPage {
            title,
            title_px,
            summary,
            summary_px,
            icon,
            count,
        } => render_icon_page(&mut body, title, *title_px, summary, *summary_px, *icon, *count),
        SocialCard::Sheet(sheet) => render_sheet(&mut body, sheet),
    }

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
            r#"viewBox="0 0 {w} {h}" font-family="{font}">{body}</svg>"#
        ),
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
        font = FONT_FAMILY,
        body = body,
    )
}

/// Escape text for use in SVG content and attribute values.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn backdrop(out: &mut String) {
    let _ = write!(
        out,
        concat!(
            r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">"#,
            r#"<stop offset="0" stop-color="{0}"/><stop offset="1" stop-color="{1}"/>"#,
            r#"</linearGradient></defs>"#,
            r#"<rect width="100%" height="100%" fill="url(#bg)"/>"#
        ),
        theme::BACKDROP,
        theme::BACKDROP_ACCENT,
    );
}

fn render_fallback(out: &mut String, image_url: &str) {
    let _ = write!(
        out,
        r#"<image href="{}" width="{CARD_WIDTH}" height="{CARD_HEIGHT}"/>"#,
        xml_escape(image_url),
    );
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Bug => "🐛",
        Icon::Merge => "🔀",
        Icon::Rocket => "🚀",
        Icon::DocumentCode => "📄",
        Icon::PencilRuler => "📐",
        Icon::Branch => "⎇",
        Icon::Conversation => "💬",
        Icon::Term => "λ",
        Icon::Type => "◇",
        Icon::Hash => "#",
    }
}

fn centered_text(out: &mut String, y: f64, px: f64, weight: u32, fill: &str, text: &str) {
    let _ = write!(
        out,
        concat!(
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="{px}" "#,
            r#"font-weight="{weight}" fill="{fill}">{text}</text>"#
        ),
        x = CARD_WIDTH / 2,
        y = y,
        px = px,
        weight = weight,
        fill = fill,
        text = xml_escape(text),
    );
}

fn render_profile(
    out: &mut String,
    title: &str,
    title_px: f64,
    subtitle: &str,
    avatar_url: Option<&str>,
) {
    backdrop(out);

    let cx = f64::from(CARD_WIDTH) / 2.0;
    let avatar_r = to_px(6.0);
    let avatar_cy = to_px(13.0);
    match avatar_url {
        Some(url) => {
            let _ = write!(
                out,
                concat!(
                    r#"<clipPath id="avatar"><circle cx="{cx}" cy="{cy}" r="{r}"/></clipPath>"#,
                    r#"<image href="{href}" x="{x}" y="{y}" width="{d}" height="{d}" "#,
                    r#"clip-path="url(#avatar)"/>"#,
                    r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{stroke}" stroke-width="4"/>"#
                ),
                cx = cx,
                cy = avatar_cy,
                r = avatar_r,
                href = xml_escape(url),
                x = cx - avatar_r,
                y = avatar_cy - avatar_r,
                d = avatar_r * 2.0,
                stroke = theme::GRAY_LIGHTEN_40,
            );
        }
        None => {
            let _ = write!(
                out,
                r#"<circle cx="{cx}" cy="{avatar_cy}" r="{avatar_r}" fill="{}"/>"#,
                theme::GRAY_LIGHTEN_55,
            );
        }
    }

    centered_text(
        out,
        avatar_cy + avatar_r + to_px(4.5),
        title_px,
        700,
        theme::GRAY_LIGHTEN_100,
        title,
    );
    centered_text(
        out,
        avatar_cy + avatar_r + to_px(8.0),
        to_px(3.0),
        600,
        theme::GRAY_LIGHTEN_30,
        subtitle,
    );
}

fn render_icon_page(
    out: &mut String,
    title: &str,
    title_px: f64,
    summary: &str,
    summary_px: f64,
    icon: Icon,
    count: Option<u64>,
) {
    backdrop(out);

    let cx = f64::from(CARD_WIDTH) / 2.0;
    let badge_r = to_px(6.0);
    let badge_cy = to_px(13.0);
    let _ = write!(
        out,
        concat!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#,
            r#"<text x="{cx}" y="{ty}" text-anchor="middle" font-size="{ipx}">{glyph}</text>"#
        ),
        cx = cx,
        cy = badge_cy,
        r = badge_r,
        fill = theme::GRAY_LIGHTEN_100,
        ty = badge_cy + to_px(1.5),
        ipx = to_px(4.0),
        glyph = icon_glyph(icon),
    );

    if let Some(count) = count {
        let count_cx = cx + badge_r;
        let count_cy = badge_cy - badge_r + to_px(0.5);
        let _ = write!(
            out,
            concat!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="3"/>"#,
                r#"<text x="{cx}" y="{ty}" text-anchor="middle" font-size="{px}" font-weight="700" "#,
                r#"fill="{text}">{count}</text>"#
            ),
            cx = count_cx,
            cy = count_cy,
            r = to_px(2.0),
            fill = theme::GRAY_LIGHTEN_100,
            stroke = theme::GRAY_LIGHTEN_40,
            ty = count_cy + to_px(0.6),
            px = to_px(1.5),
            text = theme::GRAY_BASE,
            count = count,
        );
    }

    centered_text(
        out,
        badge_cy + badge_r + to_px(4.5),
        title_px,
        700,
        theme::GRAY_LIGHTEN_100,
        title,
    );
    centered_text(
        out,
        badge_cy + badge_r + to_px(8.0),
        summary_px,
        600,
        theme::GRAY_LIGHTEN_30,
        summary,
    );
}

/// Approximate rendered width of a row item, used to advance the cursor.
fn item_width(item: &SheetItem, px: f64) -> f64 {
    let glyph_w = px * 0.6;
    match item {
        SheetItem::Text(text) => text.chars().count() as f64 * glyph_w,
        SheetItem::IconText { text, .. } => (text.chars().count() + 2) as f64 * glyph_w,
        SheetItem::Tag(tag) => tag.label.chars().count() as f64 * glyph_w + to_px(3.0),
    }
}

fn render_row_item(out: &mut String, item: &SheetItem, x: f64, y: f64, px: f64) {
    match item {
        SheetItem::Text(text) => {
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y}" font-size="{px}" font-weight="600" fill="{fill}">{text}</text>"#,
                fill = theme::GRAY_LIGHTEN_20,
                text = xml_escape(text),
            );
        }
        SheetItem::IconText { icon, text } => {
            let _ = write!(
                out,
                concat!(
                    r#"<text x="{x}" y="{y}" font-size="{px}" fill="{ifill}">{glyph}</text>"#,
                    r#"<text x="{tx}" y="{y}" font-size="{px}" font-weight="600" fill="{fill}">{text}</text>"#
                ),
                x = x,
                y = y,
                px = px,
                ifill = theme::GRAY_LIGHTEN_30,
                glyph = icon_glyph(*icon),
                tx = x + px * 1.4,
                fill = theme::GRAY_LIGHTEN_20,
                text = xml_escape(text),
            );
        }
        SheetItem::Tag(tag) => {
            let palette = tag_palette(tag.color);
            let width = item_width(item, px);
            let height = px * 2.0;
            let _ = write!(
                out,
                concat!(
                    r#"<rect x="{x}" y="{ry}" width="{w}" height="{h}" rx="{rx}" "#,
                    r#"fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#,
                    r#"<text x="{tx}" y="{y}" text-anchor="middle" font-size="{px}" "#,
                    r#"font-weight="600" fill="{text_fill}">{label}</text>"#
                ),
                x = x,
                ry = y - px * 1.3,
                w = width,
                h = height,
                rx = height / 2.0,
                fill = palette.fill,
                stroke = palette.border,
                tx = x + width / 2.0,
                y = y,
                px = px,
                text_fill = palette.text,
                label = xml_escape(&tag.label),
            );
        }
    }
}

/// Lay a row of items out left-to-right (or right-to-left when anchored to
/// the sheet's right edge), separated by a thin divider glyph.
fn render_row(out: &mut String, items: &[SheetItem], edge_x: f64, y: f64, px: f64, rightward: bool) {
    let gap = to_px(1.0);
    let total: f64 = items.iter().map(|i| item_width(i, px) + gap * 2.0).sum::<f64>() - gap;
    let mut x = if rightward { edge_x } else { edge_x - total.max(0.0) };

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y}" font-size="{px}" fill="{fill}">|</text>"#,
                fill = theme::GRAY_LIGHTEN_40,
            );
            x += gap;
        }
        render_row_item(out, item, x, y, px);
        x += item_width(item, px) + gap;
    }
}

fn render_footer(out: &mut String, footer: Option<&Byline>, x: f64, y: f64, sheet_right: f64) {
    if let Some(byline) = footer {
        let _ = write!(
            out,
            concat!(
                r#"<text x="{x}" y="{y}" font-size="{px}" font-weight="600" fill="{author_fill}">{author}</text>"#,
                r#"<text x="{x}" y="{dy}" font-size="{px}" font-weight="600" fill="{date_fill}">{date}</text>"#
            ),
            x = x,
            y = y,
            px = to_px(1.5),
            author_fill = theme::GRAY_BASE,
            author = xml_escape(&byline.author),
            dy = y + to_px(2.0),
            date_fill = theme::GRAY_LIGHTEN_20,
            date = xml_escape(&byline.date),
        );
    }

    // Site wordmark anchors the bottom-right corner of every sheet.
    let _ = write!(
        out,
        concat!(
            r#"<text x="{x}" y="{y}" text-anchor="end" font-size="{px}" font-weight="700" "#,
            r#"fill="{fill}">Share</text>"#
        ),
        x = sheet_right,
        y = y,
        px = to_px(1.5),
        fill = theme::GRAY_LIGHTEN_20,
    );
}

fn render_sheet(out: &mut String, sheet: &SheetCard) {
    backdrop(out);

    let margin = match sheet.size {
        SheetSize::Standard => to_px(6.0),
        SheetSize::Large => to_px(3.0),
    };
    let sheet_x = margin;
    let sheet_y = margin;
    let sheet_w = f64::from(CARD_WIDTH) - margin * 2.0;
    let sheet_h = f64::from(CARD_HEIGHT) - margin * 2.0;
    let pad = to_px(3.0);

    let _ = write!(
        out,
        r#"<rect x="{sheet_x}" y="{sheet_y}" width="{sheet_w}" height="{sheet_h}" rx="{rx}" fill="{fill}"/>"#,
        rx = to_px(1.5),
        fill = theme::GRAY_LIGHTEN_100,
    );

    let left = sheet_x + pad;
    let right = sheet_x + sheet_w - pad;

    let top_row_y = sheet_y + pad + to_px(1.0);
    render_row(out, &sheet.top_left, left, top_row_y, to_px(2.0), true);
    render_row(out, &sheet.top_right, right, top_row_y, to_px(1.5), false);

    let _ = write!(
        out,
        concat!(
            r#"<text x="{x}" y="{y}" font-size="{px}" font-weight="700" "#,
            r#"fill="{fill}">{title}</text>"#
        ),
        x = left,
        y = top_row_y + to_px(6.0),
        px = to_px(4.5),
        fill = theme::GRAY_DARKEN_30,
        title = xml_escape(&sheet.title),
    );

    let bottom_row_y = top_row_y + to_px(10.0);
    let monospace_bottom = sheet
        .bottom_left
        .iter()
        .any(|item| matches!(item, SheetItem::Text(_)));
    if monospace_bottom {
        let _ = write!(out, r#"<g font-family="{FONT_FAMILY_MONO}">"#);
    }
    render_row(out, &sheet.bottom_left, left, bottom_row_y, to_px(1.5), true);
    if monospace_bottom {
        out.push_str("</g>");
    }

    render_footer(
        out,
        sheet.footer.as_ref(),
        left,
        sheet_y + sheet_h - pad - to_px(2.0),
        right,
    );
}
