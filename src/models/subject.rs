use ratatui::style::Color;
use serde::Serialize;

use super::{SubjectId, Timestamp};

/// Preset subject colors offered by the editor
pub const SUBJECT_COLORS: [&str; 12] = [
    "#4A90D9", "#E74C3C", "#2ECC71", "#F39C12", "#9B59B6", "#1ABC9C", "#E67E22", "#3498DB",
    "#E91E63", "#00BCD4", "#8BC34A", "#FF5722",
];

/// Color given to a subject when none is picked
pub const DEFAULT_COLOR: &str = SUBJECT_COLORS[0];

/// A named, colored category that sessions are logged against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub color: String, // Hex color like "#4A90D9"
    pub created_at: Timestamp,
}

impl Subject {
    /// Terminal color for this subject, gray if the stored hex is malformed
    pub fn display_color(&self) -> Color {
        parse_hex_color(&self.color)
    }
}

/// Parse a `#RRGGBB` string into a terminal color
pub fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Gray;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}
