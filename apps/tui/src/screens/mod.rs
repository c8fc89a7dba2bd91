//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic.

mod decisions;
mod overview;

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use querylens_shared::StartTab;
use ratatui::prelude::*;

pub(crate) use decisions::DecisionsScreen;
pub(crate) use overview::OverviewScreen;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Overview,
    Decisions,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Decisions => write!(f, "Technical Decisions"),
        }
    }
}

impl From<StartTab> for ScreenId {
    fn from(tab: StartTab) -> Self {
        match tab {
            StartTab::Overview => Self::Overview,
            StartTab::Decisions => Self::Decisions,
        }
    }
}

/// Per-tab state and behaviour.
pub(crate) enum Screen {
    Overview(OverviewScreen),
    Decisions(DecisionsScreen),
}

impl Screen {
    pub(crate) fn id(&self) -> ScreenId {
        match self {
            Self::Overview(_) => ScreenId::Overview,
            Self::Decisions(_) => ScreenId::Decisions,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        match self {
            Self::Overview(s) => s.draw(f, area),
            Self::Decisions(s) => s.draw(f, area),
        }
    }

    /// Handle a key the app did not consume. Returns a status message when
    /// the key changed something worth reporting.
    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        match self {
            Self::Overview(s) => s.handle_key(code, modifiers),
            Self::Decisions(s) => s.handle_key(code, modifiers),
        }
    }
}
