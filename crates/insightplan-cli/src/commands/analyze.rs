//! Analyze command - statistics, tiers and study tips for a marks file.

use std::path::PathBuf;

use colored::Colorize;
use insightplan::{
    DegeneratePolicy, HeadingKeywords, InsightConfig, InsightPlan, MockProvider,
    OpenAiCompatibleProvider, ParseMode, ParserConfig, UnavailableProvider,
};
use tracing::warn;

use super::render;
use crate::cli::{DegenerateChoice, LlmProviderChoice};

/// Arguments of the `analyze` subcommand.
pub struct AnalyzeArgs {
    pub file: PathBuf,
    pub llm: LlmProviderChoice,
    pub model: Option<String>,
    pub naive: bool,
    pub delimiter: Option<char>,
    pub degenerate: DegenerateChoice,
    pub keywords: Vec<String>,
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => return Err(format!("Delimiter must be a single ASCII character, got '{}'", c).into()),
        None => None,
    };

    let config = InsightConfig {
        parser: ParserConfig {
            mode: if args.naive {
                ParseMode::Naive
            } else {
                ParseMode::Header
            },
            delimiter,
            ..ParserConfig::default()
        },
        degenerate_policy: match args.degenerate {
            DegenerateChoice::Exclude => DegeneratePolicy::Exclude,
            DegenerateChoice::Poor => DegeneratePolicy::Poor,
        },
        heading_keywords: HeadingKeywords::default().extend(args.keywords),
        ..InsightConfig::default()
    };

    let planner = InsightPlan::with_config(config);
    let planner = match args.llm {
        LlmProviderChoice::None => planner,
        LlmProviderChoice::Mock => planner.with_gateway(MockProvider::new()),
        LlmProviderChoice::Groq => attach_provider(
            planner,
            "groq",
            OpenAiCompatibleProvider::groq_from_env(),
            args.model,
        ),
        LlmProviderChoice::OpenAI => attach_provider(
            planner,
            "openai",
            OpenAiCompatibleProvider::openai_from_env(),
            args.model,
        ),
    };

    if !args.json {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            args.file.display().to_string().white()
        );
    }

    let session = planner.analyze(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!(
        "Read {} students across {} columns",
        session.dataset.row_count().to_string().white().bold(),
        session.dataset.column_count()
    );
    println!();

    render::print_averages(&session.averages);
    println!();
    render::print_tiers(&session.tiers);

    if let Some(ref advisory) = session.advisory {
        println!();
        println!("{}", "Study Tips".yellow().bold());
        if advisory.is_fallback() {
            println!("{}", advisory.text.red());
        } else {
            render::print_report(&session.report);
        }
    }

    Ok(())
}

/// Attach a remote provider, or a failing stand-in when it cannot be built.
///
/// A missing API key must not hide the statistics: the session still runs
/// and the tips section shows the fallback text.
fn attach_provider(
    planner: InsightPlan,
    name: &str,
    provider: insightplan::Result<OpenAiCompatibleProvider>,
    model: Option<String>,
) -> InsightPlan {
    match provider {
        Ok(provider) => match model {
            Some(model) => planner.with_gateway(provider.with_model(model)),
            None => planner.with_gateway(provider),
        },
        Err(e) => {
            warn!(provider = name, error = %e, "Provider unavailable, tips will use the fallback");
            planner.with_gateway(UnavailableProvider::new(name, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insightplan::{InsightError, ReportBlock, FALLBACK_ADVICE};

    #[test]
    fn test_missing_key_still_reports_statistics() {
        let missing = Err(InsightError::Config(
            "GROQ_API_KEY environment variable not set".to_string(),
        ));
        let planner = attach_provider(InsightPlan::new(), "groq", missing, Some("llama3-70b".into()));

        let session = planner.analyze_str("Name,Math,Science\nA,20,30\nB,90,95\n").unwrap();

        assert_eq!(session.averages["Math"].average, 55.0);
        assert_eq!(session.averages["Science"].average, 62.5);
        assert_eq!(session.tiers.poor, vec!["A"]);
        assert_eq!(session.tiers.excellent, vec!["B"]);

        let advisory = session.advisory.unwrap();
        assert!(advisory.is_fallback());
        assert_eq!(advisory.text, FALLBACK_ADVICE);
        assert_eq!(session.report, vec![ReportBlock::Plain(FALLBACK_ADVICE.into())]);
    }
}
