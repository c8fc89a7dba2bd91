//! The overview page: narrative, pipeline card and two disclosure panels.
//!
//! The panel bodies are authored here and are independent of the decision
//! records in [`crate::model`]; those are rendered by [`crate::decisions`].

use crate::model::{PIPELINE_STEPS, PipelineStep};
use crate::node::{Column, Icon, Node, Tone};
use crate::primitives::{ExpandableSection, ProcessStep, Render};

pub const DATABASE_SUPPORT: &str = "Database Support";
pub const AI_EVALUATION: &str = "AI Evaluation Features";
pub const PIPELINE_CARD_TITLE: &str = "Processing Pipeline";

/// Badge per pipeline stage, index-aligned with [`PIPELINE_STEPS`].
const STAGE_BADGES: [(Icon, Tone); 4] = [
    (Icon::Database, Tone::Blue),
    (Icon::FileSearch, Tone::Green),
    (Icon::Shield, Tone::Purple),
    (Icon::Brain, Tone::Orange),
];

const NARRATIVE_SPAN: u16 = 8;
const PIPELINE_SPAN: u16 = 4;

/// Overview page state: one flag per disclosure panel, nothing else.
#[derive(Debug, Clone)]
pub struct Overview {
    sections: [ExpandableSection; 2],
}

impl Default for Overview {
    fn default() -> Self {
        Self::new()
    }
}

impl Overview {
    /// Overview with every panel collapsed.
    pub fn new() -> Self {
        Self::with_expanded(false)
    }

    /// Overview with every panel starting in the given state.
    pub fn with_expanded(expanded: bool) -> Self {
        Self {
            sections: [
                ExpandableSection::with_expanded(DATABASE_SUPPORT, database_support(), expanded),
                ExpandableSection::with_expanded(AI_EVALUATION, ai_evaluation(), expanded),
            ],
        }
    }

    pub fn sections(&self) -> &[ExpandableSection] {
        &self.sections
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut ExpandableSection> {
        self.sections.get_mut(index)
    }

    pub fn section_by_title_mut(&mut self, title: &str) -> Option<&mut ExpandableSection> {
        self.sections.iter_mut().find(|s| s.title() == title)
    }

    /// Activate the header of panel `index`. Returns the new state, or
    /// `None` when there is no such panel.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let section = self.section_mut(index)?;
        section.toggle();
        Some(section.is_expanded())
    }

    /// The pipeline card rows, in step order.
    pub fn pipeline_rows() -> Vec<ProcessStep> {
        PIPELINE_STEPS
            .iter()
            .zip(STAGE_BADGES)
            .map(|(step, (icon, tone))| step_row(step, icon, tone))
            .collect()
    }
}

impl Render for Overview {
    fn render(&self) -> Node {
        let grid = Node::Grid {
            columns: vec![
                Column {
                    span: NARRATIVE_SPAN,
                    body: narrative(),
                },
                Column {
                    span: PIPELINE_SPAN,
                    body: pipeline_card(),
                },
            ],
        };
        let sections = self.sections.iter().map(Render::render).collect();

        Node::stack(2, vec![grid, Node::stack(1, sections)])
    }
}

fn step_row(step: &PipelineStep, icon: Icon, tone: Tone) -> ProcessStep {
    ProcessStep::new(icon, step.title, step.description, tone)
}

fn narrative() -> Node {
    Node::stack(
        1,
        vec![
            Node::heading(2, "The Migration Dilemma"),
            Node::paragraph(
                "There are many compelling benefits to running on the latest database \
                 versions, including avoiding AWS end-of-life surcharges, gaining access to \
                 IO-optimized instance options, taking advantage of cost-optimized pricing \
                 tiers, and receiving critical security patches. However, organizations often \
                 hesitate to upgrade due to the inherent fear that existing business logic, \
                 particularly complex SQL queries that power critical applications, might \
                 break in subtle ways on newer versions. This creates a tension between \
                 wanting to modernize and fear of disrupting business operations.",
            ),
            Node::paragraph(
                "QueryLens addresses this challenge by leveraging Large Language Models to \
                 automatically analyze SQL query patterns and evaluate compatibility across \
                 versions. By processing anonymized query logs through a sophisticated AI \
                 pipeline, it can identify which queries are fully compatible with target \
                 database versions, which might need minor modifications, and which could be \
                 problematic. This automated analysis gives teams the confidence to plan and \
                 execute database upgrades with a clear understanding of potential impacts, \
                 turning an uncertain migration into a well-understood, manageable project.",
            ),
        ],
    )
}

fn pipeline_card() -> Node {
    let mut rows = Vec::with_capacity(PIPELINE_STEPS.len() * 2);
    for (i, step) in Overview::pipeline_rows().iter().enumerate() {
        if i > 0 {
            rows.push(Node::Connector {
                icon: Icon::ArrowDown,
            });
        }
        rows.push(step.render());
    }

    Node::card(Some(PIPELINE_CARD_TITLE), Node::stack(0, rows))
}

fn subsection(title: &str, body: Vec<Node>) -> Node {
    let mut children = vec![Node::heading(3, title)];
    children.extend(body);
    Node::stack(0, children)
}

fn database_support() -> Node {
    let body = Node::stack(
        1,
        vec![
            subsection(
                "1. Aurora MySQL",
                vec![Node::bullets([
                    "Native audit log integration via CloudWatch",
                    "Efficient CSV-format parsing with field validation",
                    "Handles both single and multi-line queries",
                    "Supports all MySQL-specific syntax variations",
                    "Automatic version detection and compatibility rules",
                ])],
            ),
            subsection(
                "2. Aurora PostgreSQL",
                vec![Node::bullets([
                    "Direct AUDIT log processing",
                    "Structured log parsing with timestamp correlation",
                    "Full support for PostgreSQL-specific features",
                    "Transaction boundary detection",
                    "Schema-aware analysis",
                ])],
            ),
            subsection(
                "3. Query Clustering",
                vec![Node::bullets([
                    "Groups similar queries using Athena for efficiency",
                    "The batch size of 10,000 queries",
                    "Deduplicates identical queries while preserving counts",
                ])],
            ),
            subsection(
                "4. Data Privacy",
                vec![Node::bullets([
                    "Comprehensive SQL parsing and obfuscation",
                    "Replaces literals with type-safe placeholders",
                    "Preserves query structure for analysis",
                    "Handles complex nested queries",
                    "Maintains compliance with data protection rules",
                ])],
            ),
            subsection(
                "Processing Pipeline",
                vec![
                    Node::paragraph("The system processes logs in three phases:"),
                    Node::numbered([
                        "Extract: Pull raw logs from RDS instances",
                        "Transform: Parse, cluster, and obfuscate queries",
                        "Load: Store processed data for analysis",
                    ]),
                    Node::paragraph(
                        "All operations are fully asynchronous with automatic retries and \
                         backoff strategies to handle rate limits and throttling.",
                    ),
                ],
            ),
        ],
    );

    Node::card(None, body)
}

fn ai_evaluation() -> Node {
    let scoring = Node::List {
        ordered: false,
        items: vec![
            Node::stack(
                0,
                vec![
                    Node::paragraph("Binary scoring system:"),
                    Node::bullets([
                        "1.0 for exact match",
                        "0.5 for \"MOSTLY COMPATIBLE\" when expected is \"COMPATIBLE\"",
                        "0.0 for incorrect matches",
                    ]),
                ],
            ),
            Node::paragraph("Results tracked in Langfuse for monitoring"),
            Node::paragraph("Caching via SQLite to prevent duplicate evaluations"),
            Node::paragraph("Parallel processing with configurable batch sizes"),
        ],
    };

    let body = Node::stack(
        1,
        vec![
            subsection(
                "1. Perplexity (Primary Model)",
                vec![Node::bullets([
                    "Uses llama-3.1-sonar-huge-128k-online",
                    "Rate limited to 50 requests/second",
                    "Temperature set to 0 for deterministic outputs",
                    "Cached responses using SQLite for efficiency",
                ])],
            ),
            subsection(
                "2. Claude-3-Sonnet (Secondary Model)",
                vec![Node::bullets([
                    "Uses anthropic.claude-3-5-sonnet-20240620-v1:0 via AWS Bedrock",
                    "Rate limited to 50 requests/second",
                    "Maximum context of 4000 tokens",
                    "Specialized prompt template for SQL analysis",
                ])],
            ),
            subsection(
                "3. GPT-4 (Tertiary Model)",
                vec![Node::bullets([
                    "Uses latest GPT-4 models including gpt-4o-2024-08-06",
                    "Rate limited to 1000 requests/second",
                    "Maximum output of 4000 tokens",
                    "5 retries on failure",
                ])],
            ),
            subsection("4. Unified Scoring Pipeline", vec![scoring]),
            Node::paragraph(
                "The system uses a unified API layer with automatic rate limiting, retries, \
                 and caching. All evaluations are tracked in Langfuse for monitoring and \
                 improvement.",
            ),
        ],
    );

    Node::card(None, body)
}
