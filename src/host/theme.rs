use ratatui::style::{Color, Modifier, Style};

/// Style table for the browse host.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header: Style,
    pub row_highlight: Style,
    pub badge: Style,
    pub empty: Style,
    pub map: Style,
}

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(15, 23, 42)),
    row_highlight: Style::new()
        .bg(Color::Rgb(30, 41, 59))
        .fg(Color::Rgb(250, 204, 21)),
    badge: Style::new().fg(Color::LightCyan),
    empty: Style::new().fg(Color::DarkGray),
    map: Style::new()
        .fg(Color::Rgb(148, 163, 184))
        .add_modifier(Modifier::DIM),
};

impl Default for Theme {
    fn default() -> Self {
        SLATE
    }
}
