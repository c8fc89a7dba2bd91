//! Plain-text rendering of a content tree.
//!
//! Used for non-interactive output. Grid columns are stacked rather than
//! laid out side by side.

use crate::node::Node;

/// Render `node` as newline-separated plain text.
pub fn render_text(node: &Node) -> String {
    render_lines(node).join("\n")
}

/// Render `node` as a list of lines without trailing newlines.
pub fn render_lines(node: &Node) -> Vec<String> {
    match node {
        Node::Empty => Vec::new(),
        Node::Heading { level, text } => {
            let mut out = vec![text.clone()];
            if *level <= 2 {
                out.push("─".repeat(width(text)));
            }
            out
        }
        Node::Paragraph { text } => vec![text.clone()],
        Node::List { ordered, items } => {
            let mut out = Vec::new();
            for (i, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("{}. ", i + 1)
                } else {
                    "• ".to_string()
                };
                let item_lines = render_lines(item);
                if item_lines.is_empty() {
                    out.push(marker.trim_end().to_string());
                    continue;
                }
                let pad = " ".repeat(width(&marker));
                for (j, line) in item_lines.into_iter().enumerate() {
                    let lead = if j == 0 { &marker } else { &pad };
                    out.push(format!("{lead}{line}"));
                }
            }
            out
        }
        // Carriage returns and trailing blank lines are kept.
        Node::Code { text } => text.split('\n').map(|l| format!("    {l}")).collect(),
        Node::Badge { icon, .. } => vec![format!("[{}]", icon.glyph())],
        Node::Connector { icon } => vec![format!("  {}", icon.glyph())],
        Node::Row { children } => join_horizontal(children.iter().map(render_lines).collect()),
        Node::Stack { gap, children } => {
            join_vertical(children.iter().map(render_lines), usize::from(*gap))
        }
        Node::Card {
            title,
            description,
            body,
        } => {
            let mut out = Vec::new();
            if let Some(title) = title {
                out.push(title.clone());
                out.push("─".repeat(width(title)));
            }
            if let Some(description) = description {
                out.push(description.clone());
            }
            out.extend(render_lines(body));
            out
        }
        Node::Grid { columns } => join_vertical(columns.iter().map(|c| render_lines(&c.body)), 1),
        Node::Disclosure {
            title,
            indicator,
            body,
        } => {
            let mut out = vec![format!("{title} {}", indicator.glyph())];
            if let Some(body) = body {
                out.extend(render_lines(body).into_iter().map(|l| indent(&l, 2)));
            }
            out
        }
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn indent(line: &str, by: usize) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{}{line}", " ".repeat(by))
    }
}

fn join_vertical(blocks: impl Iterator<Item = Vec<String>>, gap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for block in blocks.filter(|b| !b.is_empty()) {
        if !out.is_empty() {
            out.extend(std::iter::repeat_n(String::new(), gap));
        }
        out.extend(block);
    }
    out
}

fn join_horizontal(cells: Vec<Vec<String>>) -> Vec<String> {
    let height = cells.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = cells
        .iter()
        .map(|c| c.iter().map(|l| width(l)).max().unwrap_or(0))
        .collect();

    (0..height)
        .map(|row| {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    let text = cell.get(row).map(String::as_str).unwrap_or("");
                    format!("{text}{}", " ".repeat(w - width(text)))
                })
                .collect::<Vec<_>>()
                .join(" ");
            line.trim_end().to_string()
        })
        .collect()
}
