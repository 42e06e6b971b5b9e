//! Analytics over a parsed dataset.
//!
//! Column statistics and tier classification are independent of each
//! other; both are pure functions of the [`Dataset`](crate::Dataset).

mod columns;
mod tiers;

pub use columns::{
    column_averages, numeric_averages, parse_score, round2, summarize_columns, ColumnAverage,
    ColumnSummary,
};
pub use tiers::{
    row_average, DegeneratePolicy, Tier, TierClassifier, TierGroups, EXCELLENT_THRESHOLD,
    MID_THRESHOLD,
};
