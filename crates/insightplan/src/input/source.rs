//! Dataset types and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column holding the student's identity.
pub const NAME_COLUMN: &str = "Name";

/// Column holding the pass/fail status.
pub const PASS_COLUMN: &str = "Pass";

/// Returns true for columns that take part in numeric analytics.
pub fn is_metric_column(column: &str) -> bool {
    column != NAME_COLUMN && column != PASS_COLUMN
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows kept after filtering.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the analysis was performed.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// One student row: column name to raw cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, String>,
}

impl Record {
    /// Build a record against a discovered column set.
    ///
    /// Missing trailing cells become empty strings and surplus cells are
    /// dropped, so every record carries exactly `columns` as its keys.
    pub fn from_row<I, S>(columns: &[String], cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = cells.into_iter();
        let values = columns
            .iter()
            .map(|column| {
                let value = cells.next().map(Into::into).unwrap_or_default();
                (column.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Get the raw value of a column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(|s| s.as_str())
    }

    /// The student's `Name` value, if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_COLUMN)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the metric cells, skipping `Name` and `Pass`.
    pub fn metric_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(column, _)| is_metric_column(column))
    }

    /// Check whether every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the record has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parsed student records sharing one column set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names discovered from the header row.
    pub columns: Vec<String>,
    /// Records in file row order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset, dropping rows whose cells are all empty.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let records = records.into_iter().filter(|r| !r.is_blank()).collect();
        Self { columns, records }
    }

    /// Build a dataset from a header and positional rows.
    pub fn from_rows<R, S>(columns: Vec<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = rows
            .into_iter()
            .map(|row| Record::from_row(&columns, row))
            .collect();
        Self::new(columns, records)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether there are no rows to analyze.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns eligible for numeric analytics, in header order.
    pub fn metric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .filter(|c| is_metric_column(c))
    }
}
