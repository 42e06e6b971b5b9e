//! InsightPlan: student performance analytics with LLM-generated study tips.
//!
//! InsightPlan reads a table of student marks (one row per student, one
//! column per subject), computes per-subject averages, sorts students into
//! performance tiers and asks a language model for improvement tips.
//!
//! # Pipeline
//!
//! - **Parse**: delimited text becomes a [`Dataset`] of field-keyed records
//! - **Analyze**: column averages and [`Tier`] groups, both pure functions
//! - **Advise**: an optional [`SuggestionGateway`] produces advisory text,
//!   which [`ReportFormatter`] splits into display blocks
//!
//! `Name` and `Pass` columns are never treated as scores.
//!
//! # Example
//!
//! ```no_run
//! use insightplan::{InsightPlan, MockProvider};
//!
//! let planner = InsightPlan::new().with_gateway(MockProvider::new());
//! let session = planner.analyze("marks.csv").unwrap();
//!
//! for (subject, avg) in &session.averages {
//!     println!("{}: {:.2}", subject, avg.average);
//! }
//! println!("Excellent: {:?}", session.tiers.excellent);
//! ```

pub mod analysis;
pub mod error;
pub mod input;
pub mod llm;
pub mod report;

mod planner;

pub use crate::planner::{AnalysisSession, InsightConfig, InsightPlan};
pub use analysis::{
    ColumnAverage, ColumnSummary, DegeneratePolicy, Tier, TierClassifier, TierGroups,
};
pub use error::{InsightError, Result};
pub use input::{Dataset, ParseMode, Parser, ParserConfig, Record, SourceMetadata};
pub use llm::{
    Advisory, LlmConfig, MockProvider, OpenAiCompatibleProvider, SuggestionGateway,
    UnavailableProvider, FALLBACK_ADVICE,
};
pub use report::{HeadingKeywords, ReportBlock, ReportFormatter};
