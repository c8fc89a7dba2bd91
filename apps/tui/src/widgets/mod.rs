//! Reusable TUI widgets.

mod content;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub(crate) use content::Painter;

/// Lines moved per PgUp/PgDn.
pub(crate) const SCROLL_STEP: u16 = 5;

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}"))
        .style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White),
        )
}

/// Dim, centered one-line hint under a screen's content.
pub(crate) fn controls_hint(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}
