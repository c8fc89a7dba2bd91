//! The closed content tree every primitive renders into.

use serde::Serialize;

/// Number of columns a [`Node::Grid`] divides its width into.
pub const GRID_COLUMNS: u16 = 12;

/// Glyphs available to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Database,
    FileSearch,
    Shield,
    Brain,
    ArrowDown,
    ChevronDown,
    ChevronUp,
}

impl Icon {
    /// Single-cell glyph used by text front ends.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Database => "≣",
            Self::FileSearch => "⌕",
            Self::Shield => "⛨",
            Self::Brain => "✦",
            Self::ArrowDown => "↓",
            Self::ChevronDown => "▼",
            Self::ChevronUp => "▲",
        }
    }
}

/// Colour tag for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Blue,
    Green,
    Purple,
    Orange,
    Muted,
}

/// One column of a [`Node::Grid`], `span` out of [`GRID_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub span: u16,
    pub body: Node,
}

/// A node in the rendered content tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    #[default]
    Empty,
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<Node>,
    },
    /// Preformatted text, kept verbatim.
    Code {
        text: String,
    },
    Badge {
        icon: Icon,
        tone: Tone,
    },
    Connector {
        icon: Icon,
    },
    /// Children laid side by side.
    Row {
        children: Vec<Node>,
    },
    /// Children laid top to bottom, `gap` blank lines apart.
    Stack {
        gap: u16,
        children: Vec<Node>,
    },
    Card {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        body: Box<Node>,
    },
    Grid {
        columns: Vec<Column>,
    },
    /// Header plus body; `body` is `None` whenever the panel is collapsed.
    Disclosure {
        title: String,
        indicator: Icon,
        body: Option<Box<Node>>,
    },
}

impl Node {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    /// Unordered list of plain-text items.
    pub fn bullets<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            ordered: false,
            items: items.into_iter().map(Self::paragraph).collect(),
        }
    }

    /// Ordered list of plain-text items.
    pub fn numbered<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            ordered: true,
            items: items.into_iter().map(Self::paragraph).collect(),
        }
    }

    pub fn stack(gap: u16, children: Vec<Node>) -> Self {
        Self::Stack { gap, children }
    }

    pub fn row(children: Vec<Node>) -> Self {
        Self::Row { children }
    }

    pub fn card(title: Option<&str>, body: Node) -> Self {
        Self::Card {
            title: title.map(str::to_string),
            description: None,
            body: Box::new(body),
        }
    }

    /// Depth-first, pre-order walk over this node and all descendants.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        match self {
            Self::List { items: children, .. }
            | Self::Row { children }
            | Self::Stack { children, .. } => {
                for child in children {
                    child.visit(f);
                }
            }
            Self::Card { body, .. } => body.visit(f),
            Self::Grid { columns } => {
                for column in columns {
                    column.body.visit(f);
                }
            }
            Self::Disclosure {
                body: Some(body), ..
            } => body.visit(f),
            _ => {}
        }
    }

    /// Whether any text carried by this subtree contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        let mut found = false;
        self.visit(&mut |node| {
            let hit = match node {
                Self::Heading { text, .. }
                | Self::Paragraph { text }
                | Self::Code { text }
                | Self::Disclosure { title: text, .. } => text.contains(needle),
                Self::Card {
                    title, description, ..
                } => [title, description]
                    .into_iter()
                    .flatten()
                    .any(|t| t.contains(needle)),
                _ => false,
            };
            found |= hit;
        });
        found
    }

    /// Count descendants (including self) matching `pred`.
    pub fn count(&self, pred: impl Fn(&Node) -> bool) -> usize {
        let mut n = 0;
        self.visit(&mut |node| {
            if pred(node) {
                n += 1;
            }
        });
        n
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::paragraph(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::paragraph(text)
    }
}
