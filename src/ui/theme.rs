//! Color theme constants for the quill UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

use crate::app::StatusKind;

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color - white for the logo
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for input areas
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Success messages - green
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Error messages - red
pub const COLOR_ERROR: Color = Color::Red;

/// Links and image URLs - blue
pub const COLOR_LINK: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Color for a status line of the given kind.
pub fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Info => COLOR_DIM,
        StatusKind::Success => COLOR_SUCCESS,
        StatusKind::Error => COLOR_ERROR,
    }
}
