//! Per-column statistics over metric columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::Dataset;

/// Parse a raw cell as a score.
///
/// Surrounding whitespace is ignored. Non-numeric tokens and non-finite
/// values (`NaN`, `inf`) are rejected.
pub fn parse_score(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Round to two decimal places.
///
/// Values too large to scale are already far beyond two-decimal precision
/// and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

// Welford-style streaming mean. The update is split into `value / n` and
// `mean / n` so that no intermediate overflows for finite inputs.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RunningMean {
    mean: f64,
    count: usize,
}

impl RunningMean {
    pub(crate) fn push(&mut self, value: f64) {
        self.count += 1;
        let n = self.count as f64;
        self.mean += value / n - self.mean / n;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

/// Mean of the numeric values seen in one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnAverage {
    /// Mean rounded to two decimals.
    pub average: f64,
    /// Number of values that parsed as numbers.
    pub count: usize,
    /// Unrounded mean.
    pub mean: f64,
}

/// Summary of one metric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSummary {
    /// At least one value parsed as a number.
    Numeric(ColumnAverage),
    /// No numeric values; counts of each distinct label.
    ///
    /// Labels are grouped case-insensitively and keyed by the first
    /// spelling seen.
    Categorical { counts: IndexMap<String, usize> },
}

impl ColumnSummary {
    /// The numeric average, if this column is numeric.
    pub fn as_average(&self) -> Option<&ColumnAverage> {
        match self {
            ColumnSummary::Numeric(avg) => Some(avg),
            ColumnSummary::Categorical { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    values: RunningMean,
    // lowercase label -> (first-seen spelling, count)
    labels: IndexMap<String, (String, usize)>,
}

impl Accumulator {
    fn add(&mut self, raw: &str) {
        if let Some(value) = parse_score(raw) {
            self.values.push(value);
        } else {
            let label = raw.trim();
            if !label.is_empty() {
                self.labels
                    .entry(label.to_lowercase())
                    .or_insert_with(|| (label.to_string(), 0))
                    .1 += 1;
            }
        }
    }

    fn average(&self) -> Option<ColumnAverage> {
        self.values.mean().map(|mean| ColumnAverage {
            average: round2(mean),
            count: self.values.count(),
            mean,
        })
    }

    fn into_summary(self) -> Option<ColumnSummary> {
        match self.average() {
            Some(avg) => Some(ColumnSummary::Numeric(avg)),
            None if !self.labels.is_empty() => Some(ColumnSummary::Categorical {
                counts: self.labels.into_values().collect(),
            }),
            None => None,
        }
    }
}

/// Single pass over every metric cell, keyed in first-seen column order.
fn accumulate(dataset: &Dataset) -> IndexMap<String, Accumulator> {
    let mut columns: IndexMap<String, Accumulator> = IndexMap::new();

    for record in &dataset.records {
        for (column, value) in record.metric_values() {
            match columns.get_mut(column) {
                Some(acc) => acc.add(value),
                None => {
                    let mut acc = Accumulator::default();
                    acc.add(value);
                    columns.insert(column.to_string(), acc);
                }
            }
        }
    }

    columns
}

/// Compute the numeric mean of every metric column.
///
/// Columns without a single parseable value are left out.
pub fn column_averages(dataset: &Dataset) -> IndexMap<String, ColumnAverage> {
    numeric_averages(&summarize_columns(dataset))
}

/// The numeric columns of a summary, in summary order.
pub fn numeric_averages(
    summary: &IndexMap<String, ColumnSummary>,
) -> IndexMap<String, ColumnAverage> {
    let averages: IndexMap<String, ColumnAverage> = summary
        .iter()
        .filter_map(|(column, s)| s.as_average().map(|avg| (column.clone(), *avg)))
        .collect();

    debug!(columns = averages.len(), "Computed column averages");
    averages
}

/// Summarize every metric column as numeric or categorical.
///
/// A column is numeric as soon as one value parses; its non-numeric values
/// are then ignored. Columns that are entirely empty are left out.
pub fn summarize_columns(dataset: &Dataset) -> IndexMap<String, ColumnSummary> {
    accumulate(dataset)
        .into_iter()
        .filter_map(|(column, acc)| acc.into_summary().map(|summary| (column, summary)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| r.iter().copied()),
        )
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("42"), Some(42.0));
        assert_eq!(parse_score("  61.5 "), Some(61.5));
        assert_eq!(parse_score("-3"), Some(-3.0));
        assert_eq!(parse_score("good"), None);
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("12abc"), None);
        assert_eq!(parse_score("NaN"), None);
        assert_eq!(parse_score("inf"), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(62.5), 62.5);
        assert_eq!(round2(61.654), 61.65);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-f64::MAX), -f64::MAX);
    }

    #[test]
    fn test_huge_values_keep_finite_average() {
        let single = column_averages(&dataset(&["Name", "Math"], &[&["A", "1e307"]]));
        assert_eq!(single["Math"].average, 1e307);

        let pair = column_averages(&dataset(
            &["Name", "Math"],
            &[&["A", "1e308"], &["B", "1e308"]],
        ));
        assert!(pair["Math"].average.is_finite());
        assert_eq!(pair["Math"].average, 1e308);
        assert_eq!(pair["Math"].count, 2);

        let opposite = column_averages(&dataset(
            &["Name", "Math"],
            &[&["A", "1.7e308"], &["B", "-1.7e308"]],
        ));
        assert_eq!(opposite["Math"].average, 0.0);
    }

    #[test]
    fn test_running_mean() {
        let mut mean = RunningMean::default();
        assert_eq!(mean.mean(), None);
        for v in [20.0, 90.0, 40.0] {
            mean.push(v);
        }
        assert_eq!(mean.count(), 3);
        assert!((mean.mean().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_student_averages() {
        let data = dataset(
            &["Name", "Math", "Science"],
            &[&["A", "20", "30"], &["B", "90", "95"]],
        );
        let averages = column_averages(&data);

        assert_eq!(averages.len(), 2);
        assert_eq!(averages["Math"].average, 55.0);
        assert_eq!(averages["Science"].average, 62.5);
        assert_eq!(averages["Science"].count, 2);
    }

    #[test]
    fn test_non_numeric_values_are_skipped() {
        let data = dataset(
            &["Name", "Math", "Science"],
            &[&["A", "20", "good"], &["B", "90", "80"]],
        );
        let averages = column_averages(&data);

        assert_eq!(averages["Science"].average, 80.0);
        assert_eq!(averages["Science"].count, 1);
    }

    #[test]
    fn test_reserved_columns_are_ignored() {
        let data = dataset(&["Name", "Pass", "Math"], &[&["7", "1", "50"]]);
        let averages = column_averages(&data);

        assert_eq!(averages.keys().collect::<Vec<_>>(), vec!["Math"]);
    }

    #[test]
    fn test_text_only_column_is_omitted() {
        let data = dataset(
            &["Name", "Conduct", "Math"],
            &[&["A", "Good", "50"], &["B", "Bad", "70"]],
        );
        let averages = column_averages(&data);

        assert!(!averages.contains_key("Conduct"));
        assert_eq!(averages.keys().collect::<Vec<_>>(), vec!["Math"]);
    }

    #[test]
    fn test_summary_counts_categorical_labels() {
        let data = dataset(
            &["Name", "Conduct", "Math", "Notes"],
            &[
                &["A", "Good", "50", ""],
                &["B", " good", "x", ""],
                &["C", "Average", "70", ""],
            ],
        );
        let summary = summarize_columns(&data);

        assert_eq!(summary.keys().collect::<Vec<_>>(), vec!["Conduct", "Math"]);
        match &summary["Conduct"] {
            ColumnSummary::Categorical { counts } => {
                assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["Good", "Average"]);
                assert_eq!(counts["Good"], 2);
                assert_eq!(counts["Average"], 1);
            }
            other => panic!("expected categorical summary, got {:?}", other),
        }
        assert_eq!(summary["Math"].as_average().unwrap().average, 60.0);
    }

    #[test]
    fn test_averages_come_from_summary() {
        let data = dataset(
            &["Name", "Conduct", "Math", "Science"],
            &[&["A", "Good", "50", "30"], &["B", "Bad", "70", "x"]],
        );
        let summary = summarize_columns(&data);

        assert_eq!(numeric_averages(&summary), column_averages(&data));
        assert_eq!(
            numeric_averages(&summary).keys().collect::<Vec<_>>(),
            vec!["Math", "Science"]
        );
    }

    #[test]
    fn test_empty_dataset() {
        assert!(column_averages(&Dataset::default()).is_empty());
        assert!(summarize_columns(&Dataset::default()).is_empty());
    }
}
