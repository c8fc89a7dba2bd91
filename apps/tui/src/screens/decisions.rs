//! "Technical Decisions" screen — browse the decision record per stage.

use crossterm::event::{KeyCode, KeyModifiers};
use querylens_core::DECISION_TOPICS;
use querylens_core::decisions::{render_topic, topic_label};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::widgets::{Painter, SCROLL_STEP, controls_hint};

pub(crate) struct DecisionsScreen {
    selected: usize,
    /// Rows scrolled inside the record card; reset on topic change.
    scroll: u16,
}

impl DecisionsScreen {
    pub(crate) fn new() -> Self {
        Self {
            selected: 0,
            scroll: 0,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Topics + record
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30), // Topic list
                Constraint::Min(1),     // Record
            ])
            .split(rows[0]);

        let items: Vec<ListItem> = DECISION_TOPICS
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                ListItem::new(format!("{prefix}{}", topic_label(topic))).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Topics "),
        );
        f.render_widget(list, chunks[0]);

        let topic = self.topic();
        match render_topic(topic) {
            Some(card) => Painter::new(None).draw(f, chunks[1], &card, self.scroll),
            None => {
                let missing = Paragraph::new(format!("No record for {topic}."))
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(missing, chunks[1]);
            }
        }

        f.render_widget(controls_hint("↑/↓: Select topic · PgUp/PgDn: Scroll"), rows[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> Option<String> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.select(self.selected - 1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < DECISION_TOPICS.len() {
                    self.select(self.selected + 1);
                }
            }
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(SCROLL_STEP),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(SCROLL_STEP),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        None
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.scroll = 0;
        tracing::debug!(topic = self.topic(), "decision topic selected");
    }

    fn topic(&self) -> &'static str {
        DECISION_TOPICS[self.selected]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_walks_topics_in_order() {
        let mut screen = DecisionsScreen::new();
        assert_eq!(screen.topic(), "logCollection");
        for _ in 0..10 {
            screen.handle_key(KeyCode::Down, KeyModifiers::NONE);
        }
        assert_eq!(screen.topic(), "aiAnalysis");
        screen.handle_key(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(screen.topic(), "privacy");
    }

    #[test]
    fn scroll_resets_when_topic_changes() {
        let mut screen = DecisionsScreen::new();
        screen.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(screen.scroll, 0);
        screen.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        screen.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(screen.scroll, 2 * SCROLL_STEP);

        screen.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(screen.scroll, 2 * SCROLL_STEP, "no topic change at the top");
        screen.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(screen.topic(), "processing");
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn every_topic_has_a_card() {
        for topic in DECISION_TOPICS {
            assert!(render_topic(topic).is_some(), "{topic}");
        }
    }
}
