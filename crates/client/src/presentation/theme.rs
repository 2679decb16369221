//! Colours shared by every panel.

use ratatui::style::{Color, Modifier, Style};

/// Converts a `0xRRGGBB` material colour.
pub fn rgb(color: u32) -> Color {
    let [_, r, g, b] = color.to_be_bytes();
    Color::Rgb(r, g, b)
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Behind the board where no ray hits anything.
    pub background: u32,
    pub border: Style,
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub accent: Style,
    pub muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: 0x1c2430,
            border: Style::default().fg(Color::DarkGray),
            title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            accent: Style::default().fg(rgb(0x009acd)),
            muted: Style::default().fg(Color::DarkGray),
        }
    }
}
