//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// InsightPlan: smart performance tracker for student marks
#[derive(Parser)]
#[command(name = "insightplan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a marks file: averages, tiers and study tips
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Gateway used for study tips
        #[arg(long, default_value = "none")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific, e.g., "llama3-8b-8192", "gpt-4o")
        #[arg(long)]
        model: Option<String>,

        /// Split rows on commas only, without CSV quoting rules
        #[arg(long)]
        naive: bool,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Handling of students without any numeric mark
        #[arg(long, default_value = "exclude")]
        degenerate: DegenerateChoice,

        /// Extra heading keyword for the tips report (repeatable)
        #[arg(short = 'k', long = "keyword")]
        keywords: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format saved advisory text into report blocks
    Format {
        /// Path to a text file with advisory output
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Extra heading keyword (repeatable)
        #[arg(short = 'k', long = "keyword")]
        keywords: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Gateway choice for study tips.
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// Statistics only
    #[default]
    None,
    /// Groq chat completions (GROQ_API_KEY)
    Groq,
    /// OpenAI chat completions (OPENAI_API_KEY)
    OpenAI,
    /// Deterministic offline tips
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "groq" => Ok(LlmProviderChoice::Groq),
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAI),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, groq, openai, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::Groq => write!(f, "groq"),
            LlmProviderChoice::OpenAI => write!(f, "openai"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

/// Policy for students with no numeric marks.
#[derive(Clone, Debug, Default)]
pub enum DegenerateChoice {
    /// List them as unclassified
    #[default]
    Exclude,
    /// Count them as Poor
    Poor,
}

impl std::str::FromStr for DegenerateChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" | "skip" => Ok(DegenerateChoice::Exclude),
            "poor" => Ok(DegenerateChoice::Poor),
            _ => Err(format!("Unknown policy: {}. Use: exclude or poor.", s)),
        }
    }
}

impl std::fmt::Display for DegenerateChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateChoice::Exclude => write!(f, "exclude"),
            DegenerateChoice::Poor => write!(f, "poor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_args() {
        let cli = Cli::parse_from([
            "insightplan", "analyze", "marks.csv", "--llm", "mock", "-k", "Physics", "--json",
        ]);
        match cli.command {
            Commands::Analyze {
                llm, keywords, json, ..
            } => {
                assert!(matches!(llm, LlmProviderChoice::Mock));
                assert_eq!(keywords, vec!["Physics"]);
                assert!(json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        assert!("anthropic".parse::<LlmProviderChoice>().is_err());
        assert!(matches!("POOR".parse::<DegenerateChoice>(), Ok(DegenerateChoice::Poor)));
    }
}
