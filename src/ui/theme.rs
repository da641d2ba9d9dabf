//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection. The
//! theme covers the chrome around the bars; tick colors come from the
//! app's [`ColorScale`](crate::data::ColorScale).

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for monitors that are currently up.
    pub up: Color,
    /// Color for monitors with an ongoing incident.
    pub down: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headers.
    pub header: Style,
    /// Style for the selected monitor row.
    pub selected: Style,
    /// Style for de-emphasized text such as the time axis.
    pub muted: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            up: Color::Green,
            down: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            up: Color::Green,
            down: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a monitor's current status.
    pub fn status_style(&self, down: bool) -> Style {
        if down {
            Style::default().fg(self.down).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.up)
        }
    }
}
