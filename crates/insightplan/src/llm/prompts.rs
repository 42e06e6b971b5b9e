//! Prompt templates for study-tip generation.

use indexmap::IndexMap;

use crate::analysis::ColumnSummary;

/// System prompt describing the expected markdown layout.
pub fn system_prompt() -> &'static str {
    r#"You are an AI educational assistant. Based on the subject performance provided, generate AI-powered study tips.

Use this exact format:
- Each subject title must be **bold with emoji and performance** (e.g., **Math 🤔**: 61.65%)
- Add 3-4 bullet points starting with '-' (not '*')
- Add a **Pro Tip:** for each subject with some unique learning advice
- Use emojis for fun and engagement
- Add a line break between each bullet point
- After each subject, include a horizontal line (---) for visual separation
- End with a **General Improvement Tips 💪** section (4-5 tips with the same structure)
- Format using markdown style
- ⚠️ If a subject has no valid data or no tips to suggest, skip it entirely (no heading, no line)
- Do not include empty or placeholder subjects"#
}

/// One line per column: `Math: 61.65%` or `Conduct: good - 3, bad - 1`.
pub fn format_summary(summary: &IndexMap<String, ColumnSummary>) -> String {
    summary
        .iter()
        .map(|(column, stats)| match stats {
            ColumnSummary::Numeric(avg) => format!("{}: {:.2}%", column, avg.average),
            ColumnSummary::Categorical { counts } => {
                let counts = counts
                    .iter()
                    .map(|(label, n)| format!("{} - {}", label, n))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", column, counts)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the user prompt for a column summary.
pub fn tips_prompt(summary: &IndexMap<String, ColumnSummary>) -> String {
    format!(
        "Here is the subject performance summary:\n\n{}\n\nNow generate the AI-powered study tips.",
        format_summary(summary)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ColumnAverage;

    #[test]
    fn test_format_summary() {
        let mut summary = IndexMap::new();
        summary.insert(
            "Math".to_string(),
            ColumnSummary::Numeric(ColumnAverage {
                average: 61.65,
                count: 4,
                mean: 61.65,
            }),
        );
        let mut counts = IndexMap::new();
        counts.insert("Good".to_string(), 3);
        counts.insert("Bad".to_string(), 1);
        summary.insert("Conduct".to_string(), ColumnSummary::Categorical { counts });

        assert_eq!(
            format_summary(&summary),
            "Math: 61.65%\nConduct: Good - 3, Bad - 1"
        );
        assert!(tips_prompt(&summary).contains("Math: 61.65%"));
    }
}
