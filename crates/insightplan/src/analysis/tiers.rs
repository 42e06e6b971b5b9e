//! Three-tier performance classification from row averages.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::columns::{parse_score, RunningMean};
use crate::input::{Dataset, Record};

/// Averages below this are `Poor`.
pub const MID_THRESHOLD: f64 = 35.0;

/// Averages at or above this are `Excellent`.
pub const EXCELLENT_THRESHOLD: f64 = 75.0;

/// Performance tier, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Poor,
    Mid,
    Excellent,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Tier; 3] = [Tier::Poor, Tier::Mid, Tier::Excellent];

    /// Classify a defined row average. Boundaries are half-open.
    pub fn from_average(average: f64) -> Self {
        if average < MID_THRESHOLD {
            Tier::Poor
        } else if average < EXCELLENT_THRESHOLD {
            Tier::Mid
        } else {
            Tier::Excellent
        }
    }

    /// Get a human-readable label for the tier.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Poor => "Poor",
            Tier::Mid => "Mid",
            Tier::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do with a record that has no numeric scores at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Keep the record out of every tier and list it as unclassified.
    #[default]
    Exclude,
    /// Put the record in `Poor`.
    Poor,
}

/// Mean of the parseable metric values of a record.
///
/// Returns `None` when no metric value parses.
pub fn row_average(record: &Record) -> Option<f64> {
    let mut mean = RunningMean::default();
    record
        .metric_values()
        .filter_map(|(_, value)| parse_score(value))
        .for_each(|v| mean.push(v));

    mean.mean()
}

/// Student names grouped by tier, in dataset row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierGroups {
    pub poor: Vec<String>,
    pub mid: Vec<String>,
    pub excellent: Vec<String>,
    /// Records without any numeric score under [`DegeneratePolicy::Exclude`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unclassified: Vec<String>,
}

impl TierGroups {
    /// Names in one tier.
    pub fn get(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Poor => &self.poor,
            Tier::Mid => &self.mid,
            Tier::Excellent => &self.excellent,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut Vec<String> {
        match tier {
            Tier::Poor => &mut self.poor,
            Tier::Mid => &mut self.mid,
            Tier::Excellent => &mut self.excellent,
        }
    }

    /// Iterate tiers in ascending order with their names.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[String])> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }

    /// Number of students placed in a tier.
    pub fn classified_count(&self) -> usize {
        self.poor.len() + self.mid.len() + self.excellent.len()
    }
}

/// Assigns records to tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TierClassifier {
    policy: DegeneratePolicy,
}

impl TierClassifier {
    /// Create a classifier with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with an explicit degenerate-record policy.
    pub fn with_policy(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    /// Tier of a single record, or `None` if it is excluded.
    pub fn classify_record(&self, record: &Record) -> Option<Tier> {
        match row_average(record) {
            Some(avg) => Some(Tier::from_average(avg)),
            None => match self.policy {
                DegeneratePolicy::Exclude => None,
                DegeneratePolicy::Poor => Some(Tier::Poor),
            },
        }
    }

    /// Group every record of the dataset by tier.
    ///
    /// Records without a `Name` are labelled `Row N` (1-based).
    pub fn classify(&self, dataset: &Dataset) -> TierGroups {
        let mut groups = TierGroups::default();

        for (idx, record) in dataset.records.iter().enumerate() {
            let name = record
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Row {}", idx + 1));

            match self.classify_record(record) {
                Some(tier) => groups.get_mut(tier).push(name),
                None => groups.unclassified.push(name),
            }
        }

        debug!(
            poor = groups.poor.len(),
            mid = groups.mid.len(),
            excellent = groups.excellent.len(),
            unclassified = groups.unclassified.len(),
            "Classified records"
        );
        groups
    }
}
