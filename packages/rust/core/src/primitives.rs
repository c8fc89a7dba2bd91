//! Reusable presentation primitives.

use crate::node::{Icon, Node, Tone};

/// Anything that can produce a content tree.
///
/// Rendering must be a pure function of the value: calling it twice on an
/// unchanged value yields equal trees.
pub trait Render {
    fn render(&self) -> Node;
}

impl Render for Node {
    fn render(&self) -> Node {
        self.clone()
    }
}

impl Render for str {
    fn render(&self) -> Node {
        Node::paragraph(self)
    }
}

impl Render for String {
    fn render(&self) -> Node {
        Node::paragraph(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CodeBlock
// ---------------------------------------------------------------------------

/// Preformatted text shown verbatim in a monospaced container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    content: String,
}

impl CodeBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Render for CodeBlock {
    fn render(&self) -> Node {
        Node::Code {
            text: self.content.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProcessStep
// ---------------------------------------------------------------------------

/// One row of the pipeline card: a coloured icon badge beside a title and
/// a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStep {
    pub icon: Icon,
    pub title: String,
    pub description: String,
    pub tone: Tone,
}

impl ProcessStep {
    pub fn new(
        icon: Icon,
        title: impl Into<String>,
        description: impl Into<String>,
        tone: Tone,
    ) -> Self {
        Self {
            icon,
            title: title.into(),
            description: description.into(),
            tone,
        }
    }
}

impl Render for ProcessStep {
    fn render(&self) -> Node {
        Node::row(vec![
            Node::Badge {
                icon: self.icon,
                tone: self.tone,
            },
            Node::stack(
                0,
                vec![
                    Node::heading(3, self.title.as_str()),
                    Node::paragraph(self.description.as_str()),
                ],
            ),
        ])
    }
}

// ---------------------------------------------------------------------------
// ExpandableSection
// ---------------------------------------------------------------------------

/// A disclosure panel: a header that is always shown and a body that is
/// only part of the tree while the panel is expanded.
///
/// Each panel owns its flag. Toggling one never affects another.
#[derive(Debug, Clone)]
pub struct ExpandableSection<C = Node> {
    title: String,
    expanded: bool,
    content: C,
}

impl<C: Render> ExpandableSection<C> {
    /// Collapsed panel.
    pub fn new(title: impl Into<String>, content: C) -> Self {
        Self::with_expanded(title, content, false)
    }

    /// Panel starting in the given state.
    pub fn with_expanded(title: impl Into<String>, content: C, expanded: bool) -> Self {
        Self {
            title: title.into(),
            expanded,
            content,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// Header activated: flip between collapsed and expanded.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        tracing::debug!(title = %self.title, expanded = self.expanded, "section toggled");
    }

    /// Chevron reflecting the current state.
    pub fn indicator(&self) -> Icon {
        if self.expanded {
            Icon::ChevronUp
        } else {
            Icon::ChevronDown
        }
    }
}

impl<C: Render> Render for ExpandableSection<C> {
    fn render(&self) -> Node {
        Node::Disclosure {
            title: self.title.clone(),
            indicator: self.indicator(),
            body: self.expanded.then(|| Box::new(self.content.render())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(expanded: Option<bool>) -> ExpandableSection {
        let body = Node::bullets(["Native audit log integration via CloudWatch"]);
        match expanded {
            Some(flag) => ExpandableSection::with_expanded("Database Support", body, flag),
            None => ExpandableSection::new("Database Support", body),
        }
    }

    fn has_body(node: &Node) -> bool {
        matches!(node, Node::Disclosure { body: Some(_), .. })
    }

    #[test]
    fn initial_state_follows_flag() {
        assert!(!section(None).is_expanded());
        assert!(!section(Some(false)).is_expanded());
        assert!(section(Some(true)).is_expanded());
    }

    #[test]
    fn toggles_follow_parity() {
        for initial in [false, true] {
            for n in 0..7 {
                let mut s = section(Some(initial));
                for _ in 0..n {
                    s.toggle();
                }
                assert_eq!(s.is_expanded(), initial ^ (n % 2 == 1), "initial={initial} n={n}");
            }
        }
    }

    #[test]
    fn body_present_only_when_expanded() {
        let mut s = section(None);
        for _ in 0..4 {
            let node = s.render();
            assert_eq!(has_body(&node), s.is_expanded());
            assert_eq!(
                node.contains_text("CloudWatch"),
                s.is_expanded(),
                "collapsed panels must not carry their content"
            );
            s.toggle();
        }
    }

    #[test]
    fn database_support_scenario() {
        let mut s = section(Some(false));
        let node = s.render();
        assert!(matches!(
            node,
            Node::Disclosure {
                indicator: Icon::ChevronDown,
                body: None,
                ..
            }
        ));

        s.toggle();
        let node = s.render();
        assert!(matches!(
            node,
            Node::Disclosure {
                indicator: Icon::ChevronUp,
                body: Some(_),
                ..
            }
        ));

        s.toggle();
        assert_eq!(s.render(), section(Some(false)).render());
    }

    #[test]
    fn header_always_rendered() {
        let s = section(None);
        match s.render() {
            Node::Disclosure { title, .. } => assert_eq!(title, "Database Support"),
            other => panic!("expected disclosure, got {other:?}"),
        }
    }

    #[test]
    fn generic_content_renders_lazily() {
        let step = ProcessStep::new(
            Icon::Shield,
            "Secure sensitive info",
            "Automatically detects and redacts sensitive information from queries",
            Tone::Purple,
        );
        let mut s = ExpandableSection::new("Steps", step);
        assert!(!s.render().contains_text("Secure"));
        s.toggle();
        assert!(s.render().contains_text("Secure"));
    }

    #[test]
    fn process_step_is_pure() {
        let a = ProcessStep::new(Icon::Brain, "Evaluate compatibility", "desc", Tone::Orange);
        let b = ProcessStep::new(Icon::Brain, "Evaluate compatibility", "desc", Tone::Orange);
        assert_eq!(a.render(), b.render());
        assert_eq!(a.render(), a.render());

        let c = ProcessStep::new(Icon::Brain, "Evaluate compatibility", "desc", Tone::Blue);
        assert_ne!(a.render(), c.render());
    }

    #[test]
    fn process_step_accepts_empty_strings() {
        let step = ProcessStep::new(Icon::Database, "", "", Tone::Muted);
        match step.render() {
            Node::Row { children } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0], Node::Badge { tone: Tone::Muted, .. }));
            }
            other => panic!("expected row, got {other:?}"),
        }
    }

    #[test]
    fn code_block_is_verbatim() {
        let src = "SELECT *\n  FROM t\t WHERE a = '<b>'";
        assert_eq!(
            CodeBlock::new(src).render(),
            Node::Code {
                text: src.to_string()
            }
        );
    }
}
