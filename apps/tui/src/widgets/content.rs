//! Draws a [`Node`] tree with ratatui.
//!
//! Grids and cards are laid out as real terminal regions; everything else is
//! flattened into styled lines inside a wrapping paragraph. A page taller
//! than its area is flattened as a whole so one scroll offset reaches every
//! line of it.

use querylens_core::{GRID_COLUMNS, Node, Tone};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Share of the area a fixed (non-scrolling) region may take.
const FIXED_REGION_PERCENT: u16 = 60;

/// Stateful walker: numbers disclosures in document order so the focused
/// one can be highlighted regardless of which region it lands in.
pub(crate) struct Painter {
    focused: Option<usize>,
    next_disclosure: usize,
    /// Columns available to the node being flattened; `None` never wraps rows.
    width: Option<usize>,
}

impl Painter {
    pub(crate) fn new(focused: Option<usize>) -> Self {
        Self {
            focused,
            next_disclosure: 0,
            width: None,
        }
    }

    /// Wrap row cells to fit `width` columns.
    pub(crate) fn with_width(mut self, width: u16) -> Self {
        self.width = Some(usize::from(width));
        self
    }

    /// Draw `node` into `area`. `scroll` applies to the flowing region: the
    /// last child of a page that fits, or the whole page when it does not.
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, node: &Node, scroll: u16) {
        match node {
            Node::Grid { columns } => {
                let total: u32 = columns.iter().map(|c| u32::from(c.span)).sum();
                let total = total.max(u32::from(GRID_COLUMNS));
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(
                        columns
                            .iter()
                            .map(|c| Constraint::Ratio(u32::from(c.span), total)),
                    )
                    .split(area);
                for (column, chunk) in columns.iter().zip(chunks.iter()) {
                    self.draw(f, *chunk, &column.body, 0);
                }
            }
            Node::Card {
                title,
                description,
                body,
            } => {
                let mut block = Block::default().borders(Borders::ALL);
                if let Some(title) = title {
                    block = block.title(format!(" {title} "));
                }
                let inner = block.inner(area);
                f.render_widget(block, area);

                let mut lines = Vec::new();
                if let Some(description) = description {
                    lines.push(Line::styled(
                        description.clone(),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                self.width = Some(usize::from(inner.width));
                lines.extend(self.lines(body));
                render_lines(f, inner, lines, scroll);
            }
            Node::Stack { gap, children }
                if children.iter().any(is_layout)
                    && estimate_height(node, area.width) <= area.height =>
            {
                self.draw_stack(f, area, *gap, children, scroll);
            }
            other => {
                self.width = Some(usize::from(area.width));
                let lines = self.lines(other);
                render_lines(f, area, lines, scroll);
            }
        }
    }

    fn draw_stack(
        &mut self,
        f: &mut Frame,
        area: Rect,
        gap: u16,
        children: &[Node],
        scroll: u16,
    ) {
        let children: Vec<&Node> = children.iter().filter(|c| **c != Node::Empty).collect();
        let cap = u16::try_from(u32::from(area.height) * u32::from(FIXED_REGION_PERCENT) / 100)
            .unwrap_or(area.height);

        let mut constraints = Vec::with_capacity(children.len() * 2);
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                constraints.push(Constraint::Length(gap));
            }
            if i + 1 == children.len() {
                constraints.push(Constraint::Min(0));
            } else {
                let height = estimate_height(child, area.width).min(cap);
                constraints.push(Constraint::Length(height));
            }
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            self.draw(f, chunks[i * 2], child, if last { scroll } else { 0 });
        }
    }

    /// Flatten `node` into styled lines.
    pub(crate) fn lines(&mut self, node: &Node) -> Vec<Line<'static>> {
        match node {
            Node::Empty => Vec::new(),
            Node::Heading { level, text } => {
                let style = match *level {
                    0..=2 => Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    3 => Style::default().add_modifier(Modifier::BOLD),
                    _ => Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD),
                };
                vec![Line::styled(text.clone(), style)]
            }
            Node::Paragraph { text } => vec![Line::from(text.clone())],
            Node::List { ordered, items } => {
                let mut out = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}. ", i + 1)
                    } else {
                        "• ".to_string()
                    };
                    let pad = " ".repeat(marker.chars().count());
                    for (j, line) in self.indented(pad.len(), item).into_iter().enumerate() {
                        let lead = if j == 0 {
                            Span::styled(marker.clone(), Style::default().fg(Color::DarkGray))
                        } else {
                            Span::raw(pad.clone())
                        };
                        out.push(prepend(lead, line));
                    }
                }
                out
            }
            Node::Code { text } => {
                let style = Style::default().fg(Color::Yellow).bg(Color::Black);
                text.split('\n')
                    .map(|l| Line::from(Span::styled(format!(" {l} "), style)))
                    .collect()
            }
            Node::Badge { icon, tone } => vec![Line::from(Span::styled(
                format!(" {} ", icon.glyph()),
                Style::default()
                    .fg(Color::Black)
                    .bg(tone_color(*tone))
                    .add_modifier(Modifier::BOLD),
            ))],
            Node::Connector { icon } => vec![
                Line::styled(icon.glyph(), Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
            ],
            Node::Row { children } => {
                let mut cells: Vec<Vec<Line<'static>>> =
                    children.iter().map(|c| self.lines(c)).collect();
                if let (Some(width), Some((last, lead))) = (self.width, cells.split_last_mut()) {
                    let used: usize = lead.iter().map(|c| cell_width(c) + 1).sum();
                    let room = width.saturating_sub(used);
                    *last = last.drain(..).flat_map(|l| wrap_line(l, room)).collect();
                }
                join_horizontal(cells)
            }
            Node::Stack { gap, children } => {
                let mut out = Vec::new();
                for child in children {
                    let block = self.lines(child);
                    if block.is_empty() {
                        continue;
                    }
                    if !out.is_empty() {
                        out.extend((0..*gap).map(|_| Line::default()));
                    }
                    out.extend(block);
                }
                out
            }
            Node::Card {
                title,
                description,
                body,
            } => {
                let mut out = Vec::new();
                if let Some(title) = title {
                    out.push(Line::styled(
                        title.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
                if let Some(description) = description {
                    out.push(Line::styled(
                        description.clone(),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                out.extend(self.lines(body));
                out
            }
            Node::Grid { columns } => {
                let mut out = Vec::new();
                for column in columns {
                    if !out.is_empty() {
                        out.push(Line::default());
                    }
                    out.extend(self.lines(&column.body));
                }
                out
            }
            Node::Disclosure {
                title,
                indicator,
                body,
            } => {
                let index = self.next_disclosure;
                self.next_disclosure += 1;

                let style = if self.focused == Some(index) {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                let prefix = if self.focused == Some(index) { "▸ " } else { "  " };
                let mut out = vec![Line::from(vec![
                    Span::styled(format!("{prefix}{title} "), style),
                    Span::styled(indicator.glyph(), style),
                ])];
                if let Some(body) = body {
                    out.extend(
                        self.indented(4, body)
                            .into_iter()
                            .map(|l| prepend(Span::raw("    "), l)),
                    );
                }
                out
            }
        }
    }

    /// Flatten `node` with `by` fewer columns available.
    fn indented(&mut self, by: usize, node: &Node) -> Vec<Line<'static>> {
        let outer = self.width;
        self.width = outer.map(|w| w.saturating_sub(by));
        let lines = self.lines(node);
        self.width = outer;
        lines
    }
}

/// Rows needed to show `node` at `width`, counting soft wraps.
pub(crate) fn estimate_height(node: &Node, width: u16) -> u16 {
    match node {
        Node::Grid { columns } => {
            let total: u32 = columns.iter().map(|c| u32::from(c.span)).sum();
            let total = total.max(u32::from(GRID_COLUMNS));
            columns
                .iter()
                .map(|c| {
                    let w = u32::from(width) * u32::from(c.span) / total;
                    estimate_height(&c.body, u16::try_from(w).unwrap_or(u16::MAX))
                })
                .max()
                .unwrap_or(0)
        }
        Node::Stack { gap, children } if children.iter().any(is_layout) => {
            let mut rows = 0u16;
            for (i, child) in children.iter().filter(|c| **c != Node::Empty).enumerate() {
                if i > 0 {
                    rows = rows.saturating_add(*gap);
                }
                rows = rows.saturating_add(estimate_height(child, width));
            }
            rows
        }
        Node::Card {
            title: _,
            description,
            body,
        } => {
            let inner = width.saturating_sub(2);
            let desc = u16::from(description.is_some());
            estimate_height(body, inner)
                .saturating_add(desc)
                .saturating_add(2)
        }
        other => wrapped_height(&Painter::new(None).with_width(width).lines(other), width),
    }
}

fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|l| l.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn render_lines(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>, scroll: u16) {
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn is_layout(node: &Node) -> bool {
    matches!(node, Node::Grid { .. } | Node::Card { .. })
}

fn prepend(lead: Span<'static>, line: Line<'static>) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    spans.push(lead);
    spans.extend(line.spans);
    Line::from(spans).style(line.style)
}

fn cell_width(cell: &[Line<'_>]) -> usize {
    cell.iter().map(Line::width).max().unwrap_or(0)
}

/// Word-wrap `line` to `width` columns, keeping span styles. A word wider
/// than `width` gets a row of its own.
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line];
    }

    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in line.spans {
        for word in span.content.split_inclusive(' ') {
            let fits = Span::raw(word.trim_end()).width();
            if used > 0 && used + fits > width {
                out.push(finish_row(std::mem::take(&mut current), line.style));
                used = 0;
            }
            let piece = Span::styled(word.to_string(), span.style);
            used += piece.width();
            current.push(piece);
        }
    }
    if !current.is_empty() {
        out.push(finish_row(current, line.style));
    }
    out
}

fn finish_row(mut spans: Vec<Span<'static>>, style: Style) -> Line<'static> {
    if let Some(last) = spans.last_mut() {
        let trimmed = last.content.trim_end().to_string();
        last.content = trimmed.into();
    }
    Line::from(spans).style(style)
}

fn join_horizontal(cells: Vec<Vec<Line<'static>>>) -> Vec<Line<'static>> {
    let height = cells.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = cells.iter().map(|c| cell_width(c)).collect();

    (0..height)
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            for (col, (cell, w)) in cells.iter().zip(&widths).enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" "));
                }
                let used = match cell.get(row) {
                    Some(line) => {
                        spans.extend(line.spans.iter().cloned());
                        line.width()
                    }
                    None => 0,
                };
                if col + 1 < cells.len() && used < *w {
                    spans.push(Span::raw(" ".repeat(w - used)));
                }
            }
            Line::from(spans)
        })
        .collect()
}

pub(crate) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Blue => Color::Blue,
        Tone::Green => Color::Green,
        Tone::Purple => Color::Magenta,
        Tone::Orange => Color::Indexed(208),
        Tone::Muted => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querylens_core::{ExpandableSection, Icon, Overview, ProcessStep, Render};

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn process_step_row_pads_badge_column() {
        let step = ProcessStep::new(Icon::Shield, "Secure sensitive info", "Redacts", Tone::Purple);
        let lines = Painter::new(None).lines(&step.render());
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), " ⛨  Secure sensitive info");
        assert_eq!(plain(&lines[1]), "    Redacts");
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Magenta));
    }

    #[test]
    fn focused_disclosure_is_highlighted() {
        let overview = Overview::new();
        let lines = Painter::new(Some(1)).lines(&overview.render());
        let db = lines
            .iter()
            .find(|l| plain(l).contains("Database Support"))
            .expect("db header");
        let ai = lines
            .iter()
            .find(|l| plain(l).contains("AI Evaluation Features"))
            .expect("ai header");
        assert!(plain(ai).starts_with("▸ "));
        assert!(!plain(db).starts_with("▸ "));
        assert!(ai.spans[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn expanded_body_is_indented() {
        let mut section = ExpandableSection::new("Database Support", Node::paragraph("body"));
        section.toggle();
        let lines = Painter::new(None).lines(&section.render());
        assert_eq!(plain(&lines[0]), "  Database Support ▲");
        assert_eq!(plain(&lines[1]), "    body");
    }

    #[test]
    fn height_counts_wraps_and_card_borders() {
        let para = Node::paragraph("x".repeat(25));
        assert_eq!(estimate_height(&para, 10), 3);
        assert_eq!(estimate_height(&Node::card(Some("t"), para), 12), 5);
        assert_eq!(estimate_height(&Node::Empty, 10), 0);

        let page = Node::stack(2, vec![Node::card(None, Node::paragraph("x")), Node::paragraph("y")]);
        assert_eq!(estimate_height(&page, 12), 3 + 2 + 1);
    }

    #[test]
    fn wrapped_step_description_stays_in_text_column() {
        let description = "Identifies and fetches query logs from RDS instances";
        let step = ProcessStep::new(Icon::Database, "Fetch RDS audit logs", description, Tone::Blue);
        let lines = Painter::new(None).with_width(30).lines(&step.render());

        assert_eq!(plain(&lines[0]), " ≣  Fetch RDS audit logs");
        assert!(lines.len() > 2);
        for line in &lines[1..] {
            assert!(plain(line).starts_with("    "), "{:?}", plain(line));
            assert!(line.width() <= 30);
        }
        let rejoined: Vec<String> = lines[1..].iter().map(|l| plain(l).trim().to_string()).collect();
        assert_eq!(rejoined.join(" "), description);
    }

    #[test]
    fn code_keeps_blank_trailing_lines() {
        let lines = Painter::new(None).lines(&Node::Code { text: "a\n\n".to_string() });
        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[0]), " a ");
    }
}
