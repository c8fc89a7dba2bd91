//! "Overview" screen — pipeline narrative with two disclosure panels.

use crossterm::event::{KeyCode, KeyModifiers};
use querylens_core::{Overview, Render};
use ratatui::prelude::*;

use crate::widgets::{Painter, SCROLL_STEP, controls_hint};

pub(crate) struct OverviewScreen {
    overview: Overview,
    /// Index of the disclosure header that Enter/Space activates.
    focused: usize,
    scroll: u16,
}

impl OverviewScreen {
    pub(crate) fn new(expanded: bool) -> Self {
        Self {
            overview: Overview::with_expanded(expanded),
            focused: 0,
            scroll: 0,
        }
    }

    pub(crate) fn overview(&self) -> &Overview {
        &self.overview
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Page
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let page = self.overview.render();
        Painter::new(Some(self.focused)).draw(f, chunks[0], &page, self.scroll);

        let ctrl = controls_hint("↑/↓: Select section · Enter/Space: Expand/collapse · PgUp/PgDn: Scroll");
        f.render_widget(ctrl, chunks[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> Option<String> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.focused > 0 {
                    self.focused -= 1;
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focused + 1 < self.overview.sections().len() {
                    self.focused += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let expanded = self.overview.toggle(self.focused)?;
                let title = self.overview.sections()[self.focused].title();
                Some(if expanded {
                    format!("{title} expanded")
                } else {
                    format!("{title} collapsed")
                })
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(SCROLL_STEP);
                None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
                None
            }
            KeyCode::Home => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(screen: &mut OverviewScreen, code: KeyCode) -> Option<String> {
        screen.handle_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_toggles_focused_section_only() {
        let mut screen = OverviewScreen::new(false);
        let status = press(&mut screen, KeyCode::Enter);
        assert_eq!(status.as_deref(), Some("Database Support expanded"));
        assert!(screen.overview().sections()[0].is_expanded());
        assert!(!screen.overview().sections()[1].is_expanded());

        press(&mut screen, KeyCode::Down);
        let status = press(&mut screen, KeyCode::Char(' '));
        assert_eq!(status.as_deref(), Some("AI Evaluation Features expanded"));

        press(&mut screen, KeyCode::Up);
        let status = press(&mut screen, KeyCode::Enter);
        assert_eq!(status.as_deref(), Some("Database Support collapsed"));
        assert!(screen.overview().sections()[1].is_expanded());
    }

    #[test]
    fn focus_is_clamped() {
        let mut screen = OverviewScreen::new(false);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.focused, 0);
        for _ in 0..5 {
            press(&mut screen, KeyCode::Char('j'));
        }
        assert_eq!(screen.focused, 1);
    }

    #[test]
    fn scroll_saturates() {
        let mut screen = OverviewScreen::new(true);
        press(&mut screen, KeyCode::PageUp);
        assert_eq!(screen.scroll, 0);
        press(&mut screen, KeyCode::PageDown);
        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.scroll, 2 * SCROLL_STEP);
        press(&mut screen, KeyCode::Home);
        assert_eq!(screen.scroll, 0);
    }
}
