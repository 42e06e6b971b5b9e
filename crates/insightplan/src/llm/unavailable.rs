//! Gateway standing in for a provider that could not be set up.

use indexmap::IndexMap;

use crate::analysis::ColumnSummary;
use crate::error::{InsightError, Result};

use super::provider::{LlmConfig, SuggestionGateway};

/// Gateway whose every request fails with the recorded reason.
///
/// Attached when a provider cannot be built (for example a missing API
/// key), so the session still renders statistics and [`advise`] reports
/// the fallback text.
///
/// [`advise`]: super::advise
pub struct UnavailableProvider {
    name: String,
    reason: String,
    config: LlmConfig,
}

impl UnavailableProvider {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            config: LlmConfig::default(),
        }
    }

    /// Why the provider is unavailable.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl SuggestionGateway for UnavailableProvider {
    fn suggest(&self, _summary: &IndexMap<String, ColumnSummary>) -> Result<String> {
        Err(InsightError::Gateway(format!(
            "{} unavailable: {}",
            self.name, self.reason
        )))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        &self.name
    }
}
