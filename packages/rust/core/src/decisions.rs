//! Rendering of the technical decision records.
//!
//! Kept apart from [`crate::overview`]: the overview panels carry their own
//! authored content and never read these records.

use crate::model::{DECISION_TOPICS, TechnicalDecision, technical_detail};
use crate::node::Node;
use crate::primitives::{CodeBlock, Render};

/// Human label for a topic key, e.g. `aiAnalysis` -> `AI Analysis`.
pub fn topic_label(topic: &str) -> &str {
    match topic {
        "logCollection" => "Log Collection",
        "processing" => "Processing & Clustering",
        "privacy" => "Data Privacy",
        "aiAnalysis" => "AI Analysis",
        other => other,
    }
}

impl Render for TechnicalDecision {
    fn render(&self) -> Node {
        Node::stack(
            1,
            vec![
                Node::stack(
                    0,
                    vec![Node::heading(4, "Decision:"), Node::paragraph(self.decision)],
                ),
                Node::stack(
                    0,
                    vec![
                        Node::heading(4, "Alternatives:"),
                        Node::bullets(self.alternatives.iter().copied()),
                    ],
                ),
                Node::stack(
                    0,
                    vec![
                        Node::heading(4, "Rationale:"),
                        Node::paragraph(self.rationale),
                    ],
                ),
            ],
        )
    }
}

/// Card for one topic, or `None` when the key has no record.
pub fn render_topic(topic: &str) -> Option<Node> {
    let record = technical_detail(topic)?;
    Some(Node::Card {
        title: Some(topic_label(topic).to_string()),
        description: None,
        body: Box::new(Node::stack(
            1,
            vec![CodeBlock::new(topic).render(), record.render()],
        )),
    })
}

/// Every record in pipeline order.
pub fn render_all() -> Node {
    Node::stack(2, DECISION_TOPICS.iter().filter_map(|t| render_topic(t)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sections_in_order() {
        let record = technical_detail("aiAnalysis").expect("record");
        let node = record.render();
        let headings: Vec<String> = {
            let mut out = Vec::new();
            node.visit(&mut |n| {
                if let Node::Heading { text, .. } = n {
                    out.push(text.clone());
                }
            });
            out
        };
        assert_eq!(headings, ["Decision:", "Alternatives:", "Rationale:"]);
        assert!(node.contains_text("Rule-based analysis"));
    }

    #[test]
    fn alternatives_render_as_bullets() {
        let record = technical_detail("logCollection").expect("record");
        let node = record.render();
        let bullets = node.count(|n| matches!(n, Node::List { ordered: false, .. }));
        assert_eq!(bullets, 1);
        let Node::Stack { children, .. } = &node else {
            panic!("expected stack");
        };
        let Node::Stack { children: alt, .. } = &children[1] else {
            panic!("expected alternatives stack");
        };
        let Node::List { items, .. } = &alt[1] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn topic_card_shows_key_as_code() {
        let node = render_topic("privacy").expect("privacy card");
        match &node {
            Node::Card { title, .. } => assert_eq!(title.as_deref(), Some("Data Privacy")),
            other => panic!("expected card, got {other:?}"),
        }
        assert_eq!(
            node.count(|n| matches!(n, Node::Code { text } if text == "privacy")),
            1
        );
    }

    #[test]
    fn unknown_topic_renders_nothing() {
        assert!(render_topic("billing").is_none());
        assert_eq!(topic_label("billing"), "billing");
    }

    #[test]
    fn render_all_covers_every_topic() {
        let node = render_all();
        assert_eq!(node.count(|n| matches!(n, Node::Card { .. })), 4);
        assert!(node.contains_text("Athena-based clustering"));
    }
}
