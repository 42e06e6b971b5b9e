//! Suggestion gateways that turn column statistics into study tips.
//!
//! The gateway is optional: statistics and tiers are computed without it,
//! and any gateway failure is reported as [`FALLBACK_ADVICE`].
//!
//! # Supported Providers
//!
//! - **Groq** - OpenAI-compatible API (requires `GROQ_API_KEY`)
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Mock** - Deterministic text, no network
//! - **Unavailable** - Always fails; stands in for a provider that could not be built
//!
//! # Example
//!
//! ```no_run
//! use insightplan::{InsightPlan, OpenAiCompatibleProvider};
//!
//! let planner = InsightPlan::new()
//!     .with_gateway(OpenAiCompatibleProvider::groq_from_env().unwrap());
//! ```

mod mock;
mod openai;
mod prompts;
mod provider;
mod unavailable;

pub use mock::MockProvider;
pub use openai::{OpenAiCompatibleProvider, GROQ_API_URL, OPENAI_API_URL};
pub use prompts::{format_summary, system_prompt, tips_prompt};
pub use provider::{
    advise, Advisory, AdvisoryOrigin, LlmConfig, SuggestionGateway, FALLBACK_ADVICE,
};
pub use unavailable::UnavailableProvider;
