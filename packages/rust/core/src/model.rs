//! Static content model: the pipeline steps and the technical decision
//! records behind each stage.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

/// One stage of the described pipeline, display text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineStep {
    pub title: &'static str,
    pub description: &'static str,
}

/// Pipeline stages in execution order: collect, process, secure, evaluate.
pub const PIPELINE_STEPS: [PipelineStep; 4] = [
    PipelineStep {
        title: "Fetch RDS audit logs",
        description: "Identifies and fetches query logs from RDS instances",
    },
    PipelineStep {
        title: "Identify query patterns",
        description: "Uses AI to analyze and categorize query patterns in your application",
    },
    PipelineStep {
        title: "Secure sensitive info",
        description: "Automatically detects and redacts sensitive information from queries",
    },
    PipelineStep {
        title: "Evaluate compatibility",
        description: "Assesses query compatibility with target database versions",
    },
];

/// A recorded design decision with the options it was chosen over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechnicalDecision {
    pub decision: &'static str,
    pub alternatives: &'static [&'static str],
    pub rationale: &'static str,
}

/// Topic keys in pipeline order. Lookups go through [`technical_details`];
/// this order is only used for display.
pub const DECISION_TOPICS: [&str; 4] = ["logCollection", "processing", "privacy", "aiAnalysis"];

const RECORDS: [TechnicalDecision; 4] = [
    TechnicalDecision {
        decision: "Use audit logs as the primary data source",
        alternatives: &[
            "Performance Schema",
            "General Query Log",
            "Slow Query Log",
            "Binary Log",
        ],
        rationale: "Audit logs provide the most comprehensive and reliable source of query \
                    information without impacting database performance. They capture all \
                    SQL statements with minimal overhead and include essential metadata.",
    },
    TechnicalDecision {
        decision: "Implement query clustering with Athena-based processing",
        alternatives: &[
            "Direct log parsing",
            "Stream processing",
            "Local batch processing",
        ],
        rationale: "RDS instances typically generate millions of queries, with many \
                    duplicates or variations. Athena-based clustering provides efficient \
                    processing while maintaining temporal order and query patterns.",
    },
    TechnicalDecision {
        decision: "Implement comprehensive SQL parsing and obfuscation",
        alternatives: &[
            "Regex-based replacement",
            "Hash-based anonymization",
            "Token-based masking",
        ],
        rationale: "PII/sensitive data isn't needed for compatibility analysis. Removing \
                    it enables secure query sharing across teams and environments while \
                    maintaining query structure integrity.",
    },
    TechnicalDecision {
        decision: "Implement multi-model waterfall approach with tiered capabilities",
        alternatives: &[
            "Single model approach",
            "Rule-based analysis",
            "Pattern matching",
        ],
        rationale: "Different queries require different levels of analysis. The waterfall \
                    approach optimizes for both accuracy and cost, using more capable \
                    models only when necessary.",
    },
];

static TECHNICAL_DETAILS: LazyLock<BTreeMap<&'static str, TechnicalDecision>> =
    LazyLock::new(|| DECISION_TOPICS.into_iter().zip(RECORDS).collect());

/// All decision records keyed by topic.
pub fn technical_details() -> &'static BTreeMap<&'static str, TechnicalDecision> {
    &TECHNICAL_DETAILS
}

/// Look up one decision record by topic key.
pub fn technical_detail(topic: &str) -> Option<&'static TechnicalDecision> {
    TECHNICAL_DETAILS.get(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_in_execution_order() {
        let titles: Vec<_> = PIPELINE_STEPS.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            [
                "Fetch RDS audit logs",
                "Identify query patterns",
                "Secure sensitive info",
                "Evaluate compatibility",
            ]
        );
    }

    #[test]
    fn every_topic_has_a_unique_record() {
        assert_eq!(technical_details().len(), DECISION_TOPICS.len());
        for topic in DECISION_TOPICS {
            assert!(technical_detail(topic).is_some(), "missing {topic}");
        }
    }

    #[test]
    fn ai_analysis_record_shape() {
        let record = technical_detail("aiAnalysis").expect("aiAnalysis record");
        assert!(record.decision.starts_with("Implement multi-model waterfall"));
        assert_eq!(record.alternatives.len(), 3);
        assert_eq!(
            record.alternatives,
            ["Single model approach", "Rule-based analysis", "Pattern matching"]
        );
        assert!(record.rationale.contains("waterfall approach"));
    }

    #[test]
    fn log_collection_has_four_alternatives() {
        let record = technical_detail("logCollection").expect("logCollection record");
        assert_eq!(record.alternatives.len(), 4);
        assert_eq!(record.alternatives[3], "Binary Log");
    }

    #[test]
    fn unknown_topic_is_none() {
        assert!(technical_detail("billing").is_none());
        assert!(technical_detail("AIANALYSIS").is_none());
    }

    #[test]
    fn rationale_continuation_lines_collapse() {
        let record = technical_detail("privacy").expect("privacy record");
        assert!(!record.rationale.contains("  "));
        assert!(record.rationale.contains("Removing it enables"));
    }
}
