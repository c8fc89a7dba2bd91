//! Content composition and disclosure for the QueryLens overview.
//!
//! Presentation primitives ([`CodeBlock`], [`ProcessStep`],
//! [`ExpandableSection`]) render into a closed content tree ([`Node`]).
//! The static content model ([`PIPELINE_STEPS`], [`technical_details`])
//! feeds two independent compositions: the [`Overview`] page and the
//! technical decision views in [`decisions`].
//!
//! Nothing here touches a terminal; front ends walk the tree themselves or
//! use [`text::render_text`].

pub mod decisions;
pub mod model;
pub mod node;
pub mod overview;
pub mod primitives;
pub mod text;

pub use model::{
    DECISION_TOPICS, PIPELINE_STEPS, PipelineStep, TechnicalDecision, technical_detail,
    technical_details,
};
pub use node::{Column, GRID_COLUMNS, Icon, Node, Tone};
pub use overview::Overview;
pub use primitives::{CodeBlock, ExpandableSection, ProcessStep, Render};
