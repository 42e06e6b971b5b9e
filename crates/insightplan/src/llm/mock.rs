//! Mock gateway for testing and offline runs.

use indexmap::IndexMap;

use crate::analysis::{ColumnSummary, Tier};
use crate::error::Result;

use super::provider::{LlmConfig, SuggestionGateway};

/// Mock gateway that returns predictable advisory text.
pub struct MockProvider {
    config: LlmConfig,
    response: Option<String>,
}

impl MockProvider {
    /// Create a mock that derives tips from the summary.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            response: None,
        }
    }

    /// Create a mock that always returns `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            config: LlmConfig::default(),
            response: Some(text.into()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionGateway for MockProvider {
    fn suggest(&self, summary: &IndexMap<String, ColumnSummary>) -> Result<String> {
        if let Some(ref text) = self.response {
            return Ok(text.clone());
        }

        let mut lines = Vec::new();
        for (column, stats) in summary {
            match stats {
                ColumnSummary::Numeric(avg) => {
                    let (emoji, advice) = match Tier::from_average(avg.average) {
                        Tier::Poor => ("😟", "Start again from the fundamentals"),
                        Tier::Mid => ("🤔", "Practice the topics you miss most often"),
                        Tier::Excellent => ("🌟", "Try harder problems to stay challenged"),
                    };
                    lines.push(format!("**{} {}**: {:.2}%", column, emoji, avg.average));
                    lines.push(format!("- {} in {}.", advice, column));
                    lines.push("- Review your mistakes every week.".to_string());
                }
                ColumnSummary::Categorical { counts } => {
                    let total: usize = counts.values().sum();
                    lines.push(format!("**{} 📋**: {} ratings", column, total));
                    lines.push("- Ask for feedback on what to improve.".to_string());
                }
            }
            lines.push("**Pro Tip:** Teach the topic to a friend.".to_string());
            lines.push("---".to_string());
        }

        lines.push("**General Improvement Tips 💪**".to_string());
        lines.push("1. Keep a fixed study schedule.".to_string());
        lines.push("2. Sleep well before exams.".to_string());

        Ok(lines.join("\n"))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
