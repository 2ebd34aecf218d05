//! Composes the poster as SVG markup for the rasterizer.
//!
//! Geometry is fixed at a 450x800 (9:16) canvas; the pixel density multiplier
//! is applied at rasterization time, not here.

use crate::card::state::CardState;
use crate::card::style::{FrameStyle, SealKind};

pub const CARD_WIDTH: u32 = 450;
pub const CARD_HEIGHT: u32 = 800;

const MESSAGE_WRAP_COLUMNS: usize = 38;

/// Build the complete poster SVG. `artwork` is an already-resolved data URI;
/// `None` renders the placeholder panel.
pub fn compose_svg(card: &CardState, artwork: Option<&str>) -> String {
    let recipient = escape_xml(&card.recipient);
    let sender = escape_xml(&card.sender);

    let mut svg = String::with_capacity(8 * 1024);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}">"#
    ));

    svg.push_str(r#"<defs><clipPath id="art-panel"><rect x="55" y="180" width="340" height="290" rx="24"/></clipPath>"#);
    if card.frame == FrameStyle::CandyCane {
        svg.push_str(
            r##"<pattern id="candy-stripes" width="28" height="28" patternUnits="userSpaceOnUse" patternTransform="rotate(45)"><rect width="28" height="28" fill="#ffffff"/><rect width="14" height="28" fill="#dc2626"/></pattern>"##,
        );
    }
    svg.push_str("</defs>");

    // Paper
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" rx="40" fill="#fffdfa"/>"##
    ));

    svg.push_str(&frame_markup(card.frame));

    // Header
    svg.push_str(concat!(
        r##"<polygon points="225,38 229,50 242,50 232,58 236,70 225,62 214,70 218,58 208,50 221,50" fill="#eab308"/>"##,
        r##"<text x="225" y="108" text-anchor="middle" font-family="Georgia, serif" font-style="italic" font-weight="bold" font-size="52" fill="#b91c1c">Merry</text>"##,
        r##"<text x="225" y="160" text-anchor="middle" font-family="Georgia, serif" font-style="italic" font-weight="bold" font-size="52" fill="#b91c1c">Christmas</text>"##,
    ));

    // Artwork panel
    svg.push_str(
        r##"<rect x="55" y="180" width="340" height="290" rx="24" fill="#f8fafc" stroke="#e5e7eb" stroke-width="1"/>"##,
    );
    match artwork {
        Some(uri) => {
            svg.push_str(&format!(
                r#"<image x="55" y="180" width="340" height="290" preserveAspectRatio="xMidYMid slice" clip-path="url(#art-panel)" xlink:href="{uri}"/>"#
            ));
        }
        None => svg.push_str(&placeholder_markup()),
    }

    // Greeting typography
    svg.push_str(&format!(
        r##"<text x="225" y="515" text-anchor="middle" font-family="Georgia, serif" font-style="italic" font-size="21" fill="#9ca3af">Dear {recipient},</text>"##
    ));

    let quoted = format!("\u{201c}{}\u{201d}", card.message);
    let mut y = 552;
    for line in wrap_message(&quoted, MESSAGE_WRAP_COLUMNS) {
        let line = escape_xml(&line);
        svg.push_str(&format!(
            r##"<text x="225" y="{y}" text-anchor="middle" font-family="Georgia, serif" font-style="italic" font-weight="600" font-size="17" fill="#27272a">{line}</text>"##
        ));
        y += 25;
    }

    // Signature footer
    svg.push_str(concat!(
        r##"<line x1="80" y1="722" x2="370" y2="722" stroke="#e7e5e4" stroke-width="1"/>"##,
        r##"<polygon points="225,712 233,726 217,726" fill="#15803d"/>"##,
    ));
    svg.push_str(&format!(
        r##"<text x="225" y="768" text-anchor="middle" font-family="Georgia, serif" font-style="italic" font-size="34" fill="#dc2626">{sender}</text>"##
    ));

    svg.push_str(&seal_markup(card.seal));
    svg.push_str("</svg>");
    svg
}

fn frame_markup(frame: FrameStyle) -> String {
    match frame {
        FrameStyle::Classic => [
            inset_rect(6, r##"fill="none" stroke="#991b1b" stroke-width="4""##),
            inset_rect(13, r##"fill="none" stroke="#991b1b" stroke-width="2""##),
            inset_rect(22, r##"fill="none" stroke="#fbbf24" stroke-width="3""##),
        ]
        .concat(),
        FrameStyle::CandyCane => {
            inset_rect(10, r##"fill="none" stroke="url(#candy-stripes)" stroke-width="20""##)
        }
        FrameStyle::WinterFrost => [
            inset_rect(7, r##"fill="none" stroke="#e0f2fe" stroke-width="14""##),
            inset_rect(20, r##"fill="none" stroke="#bae6fd" stroke-width="8" opacity="0.45""##),
        ]
        .concat(),
        FrameStyle::ForestPine => [
            inset_rect(6, r##"fill="none" stroke="#14532d" stroke-width="12""##),
            inset_rect(16, r##"fill="none" stroke="#4ade80" stroke-width="2""##),
        ]
        .concat(),
        FrameStyle::MidnightSleigh => [
            inset_rect(7, r##"fill="none" stroke="#0f172a" stroke-width="14""##),
            inset_rect(18, r##"fill="none" stroke="#fbbf24" stroke-width="2""##),
        ]
        .concat(),
        FrameStyle::SantasWorkshop => [
            inset_rect(5, r##"fill="none" stroke="#dc2626" stroke-width="10""##),
            inset_rect(
                5,
                r##"fill="none" stroke="#ffffff" stroke-width="4" stroke-dasharray="2 10" stroke-linecap="round""##,
            ),
        ]
        .concat(),
    }
}

fn inset_rect(inset: u32, attrs: &str) -> String {
    let rx = 40u32.saturating_sub(inset).max(8);
    format!(
        r#"<rect x="{inset}" y="{inset}" width="{}" height="{}" rx="{rx}" {attrs}/>"#,
        CARD_WIDTH - 2 * inset,
        CARD_HEIGHT - 2 * inset,
    )
}

fn placeholder_markup() -> String {
    // A large pale snowflake where the artwork would sit.
    let mut out = String::from(r##"<g stroke="#cbd5e1" stroke-width="6" stroke-linecap="round">"##);
    for angle in [0, 60, 120] {
        out.push_str(&format!(
            r#"<line x1="225" y1="265" x2="225" y2="385" transform="rotate({angle} 225 325)"/>"#
        ));
    }
    out.push_str("</g>");
    out
}

fn seal_markup(seal: SealKind) -> String {
    let (fill, motif) = match seal {
        SealKind::None => return String::new(),
        SealKind::Reindeer => (
            "#92400e",
            r##"<g stroke="#ffffff" stroke-width="2.5" fill="none" stroke-linecap="round"><path d="M -5 8 V -4 M -5 -1 L -11 -9 M -5 -4 L -9 -12"/><path d="M 5 8 V -4 M 5 -1 L 11 -9 M 5 -4 L 9 -12"/></g>"##,
        ),
        SealKind::Snowflake => (
            "#0ea5e9",
            r##"<g stroke="#ffffff" stroke-width="2.5" stroke-linecap="round"><line x1="0" y1="-11" x2="0" y2="11"/><line x1="0" y1="-11" x2="0" y2="11" transform="rotate(60)"/><line x1="0" y1="-11" x2="0" y2="11" transform="rotate(120)"/></g>"##,
        ),
        SealKind::Tree => (
            "#166534",
            r##"<polygon points="0,-11 8,2 -8,2" fill="#ffffff"/><polygon points="0,-5 9,9 -9,9" fill="#ffffff"/><rect x="-2" y="9" width="4" height="4" fill="#ffffff"/>"##,
        ),
        SealKind::Star => (
            "#b45309",
            r##"<polygon points="0,-12 3.5,-4 12,-4 5,1.5 7.5,10 0,5 -7.5,10 -5,1.5 -12,-4 -3.5,-4" fill="#ffffff"/>"##,
        ),
        SealKind::Heart => (
            "#be123c",
            r##"<path d="M 0 10 C -12 0 -9 -10 0 -4 C 9 -10 12 0 0 10 Z" fill="#ffffff"/>"##,
        ),
    };

    format!(
        r##"<g transform="translate(372 742)"><circle r="24" fill="{fill}"/><circle r="20" fill="none" stroke="#ffffff" stroke-width="1" opacity="0.5"/>{motif}</g>"##
    )
}

/// Greedy word wrap. Words longer than the column budget land on their own
/// line rather than being split.
pub fn wrap_message(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
