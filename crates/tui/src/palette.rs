//! Color utilities for pill and lane rendering.
//!
//! Programmer and status colors are stored as hex strings. This module
//! parses them into terminal colors and decides black-vs-white contrast
//! text in one place, so every caller renders consistently.

use gantry_db::Status;
use ratatui::style::Color;

/// Parse a `#RGB` or `#RRGGBB` hex color string.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Whether a color reads as light, so dark text stays legible on it.
///
/// Uses BT.601 luminance; unparseable colors count as light, matching a
/// light default background.
pub fn is_perceptually_light(color: &str) -> bool {
    let Some((r, g, b)) = parse_hex_color(color) else {
        return true;
    };
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    luminance > 0.5
}

/// Terminal color for a hex string, falling back to gray.
pub fn terminal_color(color: &str) -> Color {
    match parse_hex_color(color) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}

/// Text color that contrasts with the given background color.
pub fn contrast_color(background: &str) -> Color {
    if is_perceptually_light(background) {
        Color::Black
    } else {
        Color::White
    }
}

/// The hex color associated with a task status.
pub fn status_hex(status: &Status) -> &'static str {
    match status {
        Status::Unassigned => "#9ca3af",
        Status::Assigned => "#60a5fa",
        Status::InProgress => "#facc15",
        Status::Delayed => "#f87171",
        Status::Testing => "#c084fc",
        Status::Finished => "#4ade80",
        Status::Discarded => "#6b7280",
    }
}
