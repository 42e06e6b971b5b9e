//! Main InsightPlan struct and public API.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{
    numeric_averages, summarize_columns, ColumnAverage, ColumnSummary, DegeneratePolicy,
    TierClassifier, TierGroups,
};
use crate::error::{InsightError, Result};
use crate::input::{Dataset, Parser, ParserConfig, SourceMetadata};
use crate::llm::{advise, Advisory, SuggestionGateway};
use crate::report::{HeadingKeywords, ReportBlock, ReportFormatter};

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Handling of records without numeric scores.
    pub degenerate_policy: DegeneratePolicy,
    /// Heading keywords for the report formatter.
    pub heading_keywords: HeadingKeywords,
    /// Also treat the dataset's metric column names as heading keywords.
    pub column_headings: bool,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            degenerate_policy: DegeneratePolicy::default(),
            heading_keywords: HeadingKeywords::default(),
            column_headings: true,
        }
    }
}

/// Everything produced for one uploaded file.
///
/// A session owns its dataset; analysing another file produces a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSession {
    /// Metadata about the source file, when parsed from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Parsed records.
    pub dataset: Dataset,
    /// Numeric mean per metric column.
    pub averages: IndexMap<String, ColumnAverage>,
    /// Numeric or categorical summary per metric column.
    pub summary: IndexMap<String, ColumnSummary>,
    /// Students grouped by tier.
    pub tiers: TierGroups,
    /// Advisory text, when a gateway is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Advisory>,
    /// Advisory text split into display blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub report: Vec<ReportBlock>,
}

/// The main analysis engine.
pub struct InsightPlan {
    config: InsightConfig,
    parser: Parser,
    classifier: TierClassifier,
    gateway: Option<Arc<dyn SuggestionGateway>>,
}

impl InsightPlan {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: InsightConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let classifier = TierClassifier::with_policy(config.degenerate_policy);

        Self {
            config,
            parser,
            classifier,
            gateway: None,
        }
    }

    /// Add a gateway for advisory text.
    pub fn with_gateway(mut self, gateway: impl SuggestionGateway + 'static) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Analyze a file on disk.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisSession> {
        let (dataset, source) = self.parser.parse_file(path)?;
        let mut session = self.analyze_dataset(dataset)?;
        session.source = Some(source);
        Ok(session)
    }

    /// Analyze delimited text held in memory.
    pub fn analyze_str(&self, text: &str) -> Result<AnalysisSession> {
        let dataset = self.parser.parse_str(text)?;
        self.analyze_dataset(dataset)
    }

    /// Analyze an already parsed dataset.
    ///
    /// Fails with [`InsightError::EmptyData`] if there are no rows.
    pub fn analyze_dataset(&self, dataset: Dataset) -> Result<AnalysisSession> {
        if dataset.is_empty() {
            return Err(InsightError::EmptyData("No student rows found".to_string()));
        }

        let summary = summarize_columns(&dataset);
        let averages = numeric_averages(&summary);
        let tiers = self.classifier.classify(&dataset);

        info!(
            rows = dataset.row_count(),
            metric_columns = summary.len(),
            "Computed statistics"
        );

        let (advisory, report) = match self.gateway {
            Some(ref gateway) => {
                let advisory = advise(gateway.as_ref(), &summary);
                let report = self.report_formatter(&dataset).format(&advisory.text);
                (Some(advisory), report)
            }
            None => (None, Vec::new()),
        };

        Ok(AnalysisSession {
            source: None,
            dataset,
            averages,
            summary,
            tiers,
            advisory,
            report,
        })
    }

    /// Report formatter for a dataset's vocabulary.
    pub fn formatter_for(&self, dataset: &Dataset) -> Result<ReportFormatter> {
        let mut keywords = self.config.heading_keywords.clone();
        if self.config.column_headings {
            keywords = keywords.extend(dataset.metric_columns());
        }
        ReportFormatter::new(&keywords)
    }

    // Formatting must never cost the session its statistics, so a keyword
    // set that fails to compile degrades to the defaults, then to none.
    fn report_formatter(&self, dataset: &Dataset) -> ReportFormatter {
        match self.formatter_for(dataset) {
            Ok(formatter) => formatter,
            Err(e) => {
                warn!(error = %e, "Heading keywords rejected, using default keywords");
                ReportFormatter::with_defaults().unwrap_or_else(|e| {
                    warn!(error = %e, "Default heading keywords rejected, formatting without headings");
                    ReportFormatter::plain()
                })
            }
        }
    }
}

impl Default for InsightPlan {
    fn default() -> Self {
        Self::new()
    }
}
