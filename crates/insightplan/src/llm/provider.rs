//! Suggestion gateway trait, configuration and the fallback boundary.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::ColumnSummary;
use crate::error::Result;

/// Shown whenever advisory text cannot be obtained.
pub const FALLBACK_ADVICE: &str = "⚠️ Could not fetch suggestions from AI.";

/// Configuration for LLM-backed gateways.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "llama3-8b-8192").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama3-8b-8192".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

/// Source of advisory text.
///
/// Implementations must be thread-safe (Send + Sync) so a gateway can be
/// shared between sessions.
pub trait SuggestionGateway: Send + Sync {
    /// Produce study tips for the given column summary.
    ///
    /// Errors are reported as-is; callers normally go through [`advise`],
    /// which turns every failure into [`FALLBACK_ADVICE`].
    fn suggest(&self, summary: &IndexMap<String, ColumnSummary>) -> Result<String>;

    /// Get the configuration for this gateway.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this gateway (for logging).
    fn name(&self) -> &str;
}

/// Where the advisory text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryOrigin {
    Generated,
    Fallback,
}

/// Advisory text ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub text: String,
    pub origin: AdvisoryOrigin,
}

impl Advisory {
    /// Advisory text produced by a gateway.
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: AdvisoryOrigin::Generated,
        }
    }

    /// The fixed fallback message.
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_ADVICE.to_string(),
            origin: AdvisoryOrigin::Fallback,
        }
    }

    /// Check whether this is the fallback message.
    pub fn is_fallback(&self) -> bool {
        self.origin == AdvisoryOrigin::Fallback
    }
}

/// Ask a gateway for advice, mapping every failure to the fallback text.
///
/// An empty summary is not sent at all.
pub fn advise(
    gateway: &dyn SuggestionGateway,
    summary: &IndexMap<String, ColumnSummary>,
) -> Advisory {
    if summary.is_empty() {
        warn!(gateway = gateway.name(), "No metric columns to advise on");
        return Advisory::fallback();
    }

    match gateway.suggest(summary) {
        Ok(text) if !text.trim().is_empty() => {
            info!(gateway = gateway.name(), chars = text.len(), "Received advisory text");
            Advisory::generated(text.trim())
        }
        Ok(_) => {
            warn!(gateway = gateway.name(), "Gateway returned empty advisory text");
            Advisory::fallback()
        }
        Err(e) => {
            warn!(gateway = gateway.name(), error = %e, "Gateway request failed");
            Advisory::fallback()
        }
    }
}
