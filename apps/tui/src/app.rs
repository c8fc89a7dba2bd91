//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use querylens_shared::UiConfig;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use tracing::{debug, info};

use crate::screens::{DecisionsScreen, OverviewScreen, Screen, ScreenId};
use crate::widgets::status_bar;

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Per-tab state, in tab order.
    pub screens: Vec<Screen>,
}

impl App {
    pub(crate) fn new(config: &UiConfig) -> Self {
        let screens = vec![
            Screen::Overview(OverviewScreen::new(config.expand_sections)),
            Screen::Decisions(DecisionsScreen::new()),
        ];
        let start = ScreenId::from(config.start_tab);
        let active_tab = screens.iter().position(|s| s.id() == start).unwrap_or(0);

        Self {
            active_tab,
            should_quit: false,
            status: "Ready — press ? for help".to_string(),
            show_help: false,
            screens,
        }
    }

    fn current_screen(&self) -> &Screen {
        &self.screens[self.active_tab]
    }

    fn current_screen_mut(&mut self) -> &mut Screen {
        &mut self.screens[self.active_tab]
    }

    fn switch_to(&mut self, idx: usize) {
        self.active_tab = idx;
        let id = self.current_screen().id();
        debug!(screen = %id, "switched tab");
        self.status = format!("{id}");
    }
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(config: &UiConfig) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!(tick_rate_ms = config.tick_rate_ms, "starting TUI");

    // Run app
    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("TUI stopped");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &UiConfig,
) -> Result<()> {
    let mut app = App::new(config);
    let tick = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.switch_to(idx);
            }
            return;
        }
        KeyCode::Tab => {
            app.switch_to((app.active_tab + 1) % app.screens.len());
            return;
        }
        KeyCode::BackTab => {
            let idx = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.switch_to(idx);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    if let Some(status) = app.current_screen_mut().handle_key(code, modifiers) {
        app.status = status;
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app
        .screens
        .iter()
        .map(|s| Line::from(format!("{}", s.id())))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" QueryLens "),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area — delegate to screen
    app.current_screen().draw(f, chunks[1]);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-2          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Overview:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Select section header"),
        Line::from("  Enter/Space  Expand or collapse section"),
        Line::from("  PgUp/PgDn    Scroll · Home: top"),
        Line::from(""),
        Line::from("Technical Decisions:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Select topic"),
        Line::from("  PgUp/PgDn    Scroll record · Home: top"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use querylens_shared::StartTab;
    use ratatui::backend::TestBackend;

    fn screen_text(app: &App) -> String {
        screen_text_at(app, 120, 60)
    }

    fn screen_text_at(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, code, KeyModifiers::NONE);
    }

    #[test]
    fn starts_on_configured_tab() {
        let app = App::new(&UiConfig::default());
        assert_eq!(app.current_screen().id(), ScreenId::Overview);

        let config = UiConfig {
            start_tab: StartTab::Decisions,
            ..UiConfig::default()
        };
        let app = App::new(&config);
        assert_eq!(app.current_screen().id(), ScreenId::Decisions);
    }

    #[test]
    fn tab_keys_cycle_screens() {
        let mut app = App::new(&UiConfig::default());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, 1);
        assert_eq!(app.status, "Technical Decisions");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, 0);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_tab, 1);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active_tab, 0);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.active_tab, 0);
    }

    #[test]
    fn quit_and_help_keys() {
        let mut app = App::new(&UiConfig::default());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Enter);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn help_dismiss_does_not_toggle_section() {
        let mut app = App::new(&UiConfig::default());
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Enter);
        let text = screen_text(&app);
        assert!(text.contains("Database Support ▼"));
    }

    #[test]
    fn overview_draws_collapsed_sections() {
        let app = App::new(&UiConfig::default());
        let text = screen_text(&app);
        assert!(text.contains("QueryLens"));
        assert!(text.contains("Processing Pipeline"));
        assert!(text.contains("Fetch RDS audit logs"));
        assert!(text.contains("Database Support ▼"));
        assert!(text.contains("AI Evaluation Features ▼"));
        assert!(!text.contains("Aurora MySQL"));
    }

    #[test]
    fn enter_expands_focused_section() {
        let mut app = App::new(&UiConfig::default());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status, "Database Support expanded");

        let text = screen_text(&app);
        assert!(text.contains("Database Support ▲"));
        assert!(text.contains("Aurora MySQL"));
        assert!(!text.contains("llama-3.1-sonar-huge-128k-online"));
    }

    #[test]
    fn decisions_tab_shows_record() {
        let mut app = App::new(&UiConfig::default());
        press(&mut app, KeyCode::Char('2'));
        let text = screen_text(&app);
        assert!(text.contains("Log Collection"));
        assert!(text.contains("Use audit logs as the primary data source"));
        assert!(text.contains("Performance Schema"));
    }

    /// Draw at 80x24 after each of `pages` PgDn presses and collect every frame.
    fn page_through(app: &mut App, pages: usize) -> String {
        let mut seen = screen_text_at(app, 80, 24);
        for _ in 0..pages {
            press(app, KeyCode::PageDown);
            seen.push_str(&screen_text_at(app, 80, 24));
        }
        seen
    }

    #[test]
    fn small_terminal_reaches_whole_overview() {
        let mut app = App::new(&UiConfig::default());
        let first = screen_text_at(&app, 80, 24);
        assert!(first.contains("The Migration Dilemma"));

        let seen = page_through(&mut app, 20);
        assert!(seen.contains("manageable"));
        assert!(seen.contains("Secure sensitive info"));
        assert!(seen.contains("Evaluate compatibility"));
        assert!(seen.contains("AI Evaluation Features ▼"));
    }

    #[test]
    fn small_terminal_reaches_end_of_record() {
        let mut app = App::new(&UiConfig::default());
        press(&mut app, KeyCode::Char('2'));
        let seen = page_through(&mut app, 6);
        assert!(seen.contains("metadata"));
    }
}
