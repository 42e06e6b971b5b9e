//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Dataset, Record, SourceMetadata};
use crate::error::{InsightError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// How rows are split into cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Full CSV parsing with quoting and escaped delimiters.
    #[default]
    Header,
    /// Split every line on commas. Quotes are not understood.
    Naive,
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Row splitting strategy.
    pub mode: ParseMode,
    /// Delimiter to use in header mode (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum student rows to keep (None = all). Blank rows are dropped
    /// before they are counted.
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Header,
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses student record files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| InsightError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| InsightError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let text = String::from_utf8(contents).map_err(|e| InsightError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let delimiter = self.resolve_delimiter(&text);
        let dataset = self.parse_with(&text, delimiter)?;

        let format = match (self.config.mode, delimiter) {
            (ParseMode::Naive, _) => "csv-naive",
            (_, b'\t') => "tsv",
            (_, b',') => "csv",
            (_, b';') => "csv-semicolon",
            (_, b'|') => "psv",
            _ => "delimited",
        }
        .to_string();

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, source_metadata))
    }

    /// Parse delimited text held in memory.
    ///
    /// Empty or whitespace-only input yields an empty dataset.
    pub fn parse_str(&self, text: &str) -> Result<Dataset> {
        let delimiter = self.resolve_delimiter(text);
        self.parse_with(text, delimiter)
    }

    fn resolve_delimiter(&self, text: &str) -> u8 {
        match (self.config.mode, self.config.delimiter) {
            (ParseMode::Naive, _) => b',',
            (_, Some(d)) => d,
            (_, None) => detect_delimiter(text.as_bytes()),
        }
    }

    fn parse_with(&self, text: &str, delimiter: u8) -> Result<Dataset> {
        if text.trim().is_empty() {
            return Ok(Dataset::default());
        }

        let dataset = match self.config.mode {
            ParseMode::Header => self.parse_delimited(text, delimiter)?,
            ParseMode::Naive => self.parse_naive(text),
        };

        debug!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            mode = ?self.config.mode,
            "Parsed dataset"
        );
        Ok(dataset)
    }

    fn parse_delimited(&self, text: &str, delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns = unique_headers(reader.headers()?.iter());

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let mut records = Vec::new();
        for result in reader.records() {
            if records.len() >= limit {
                break;
            }

            let row = result?;
            let record = Record::from_row(&columns, row.iter());
            if !record.is_blank() {
                records.push(record);
            }
        }

        Ok(Dataset::new(columns, records))
    }

    fn parse_naive(&self, text: &str) -> Dataset {
        let mut lines = text.trim().split('\n').map(|l| l.trim_end_matches('\r'));

        let columns = match lines.next() {
            Some(header) => unique_headers(header.split(',')),
            None => return Dataset::default(),
        };

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let records = lines
            .map(|line| Record::from_row(&columns, line.split(',')))
            .filter(|record| !record.is_blank())
            .take(limit)
            .collect();

        Dataset::new(columns, records)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize header cells into a stable, duplicate-free column set.
fn unique_headers<'a>(cells: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();

    for (idx, cell) in cells.enumerate() {
        let base = if idx == 0 {
            cell.trim_start_matches('\u{feff}')
        } else {
            cell
        };

        let mut name = base.to_string();
        let mut suffix = 1;
        while columns.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        columns.push(name);
    }

    columns
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Falls back to a comma when no candidate appears.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = match counts.first() {
            Some(&c) if c > 0 => c,
            _ => continue,
        };

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts
                .iter()
                .map(|&c| (c as f64 - mean).powi(2))
                .sum::<f64>()
                / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data), b'\t');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter(b"Name\nAsha"), b',');
        assert_eq!(detect_delimiter(b""), b',');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = "Name,Math,Science\nAsha,40,55\nRavi,80,91";
        let dataset = parser.parse_str(data).unwrap();

        assert_eq!(dataset.columns, vec!["Name", "Math", "Science"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.records[0].get("Name"), Some("Asha"));
        assert_eq!(dataset.records[1].get("Science"), Some("91"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let parser = Parser::new();
        let data = "Name,Math\n\"Singh, Asha\",40\n\"Ravi \"\"R\"\"\",80";
        let dataset = parser.parse_str(data).unwrap();

        assert_eq!(dataset.records[0].get("Name"), Some("Singh, Asha"));
        assert_eq!(dataset.records[1].get("Name"), Some("Ravi \"R\""));
        assert_eq!(dataset.records[0].get("Math"), Some("40"));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let parser = Parser::new();
        let data = "Name,Math,Science\nAsha,40\nRavi,80,91,extra";
        let dataset = parser.parse_str(data).unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.records[0].get("Science"), Some(""));
        assert_eq!(dataset.records[1].len(), 3);
    }

    #[test]
    fn test_parse_drops_empty_rows() {
        let parser = Parser::new();
        let data = "Name,Math\nAsha,40\n,\n\nRavi,80\n";
        let dataset = parser.parse_str(data).unwrap();

        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = Parser::new();
        assert!(parser.parse_str("").unwrap().is_empty());
        assert!(parser.parse_str("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        let parser = Parser::new();
        let dataset = parser.parse_str("Name,Math\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns, vec!["Name", "Math"]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let parser = Parser::new();
        let dataset = parser.parse_str("Name,Math,Math\nAsha,40,50").unwrap();

        assert_eq!(dataset.columns, vec!["Name", "Math", "Math_1"]);
        assert_eq!(dataset.records[0].get("Math_1"), Some("50"));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let parser = Parser::with_config(ParserConfig {
            mode: ParseMode::Naive,
            ..ParserConfig::default()
        });
        let dataset = parser.parse_str("\u{feff}Name,Math\nAsha,40").unwrap();
        assert_eq!(dataset.columns[0], "Name");
    }

    #[test]
    fn test_naive_mode_splits_on_commas() {
        let parser = Parser::with_config(ParserConfig {
            mode: ParseMode::Naive,
            ..ParserConfig::default()
        });
        let data = "Name,Math\r\n\"Singh, Asha\",40\r\n";
        let dataset = parser.parse_str(data).unwrap();

        // Quotes are not understood, so the name is split in two.
        assert_eq!(dataset.records[0].get("Name"), Some("\"Singh"));
        assert_eq!(dataset.records[0].get("Math"), Some(" Asha\""));
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let dataset = parser.parse_str("Name,Math\nAsha,40\nRavi,80").unwrap();
        assert_eq!(dataset.row_count(), 1);
    }

    #[test]
    fn test_max_rows_skips_blank_rows() {
        let config = ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        };
        let text = "Name,Math\n,\nAsha,40\nRavi,80";

        let dataset = Parser::with_config(config.clone()).parse_str(text).unwrap();
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.records[0].name(), Some("Asha"));

        let naive = Parser::with_config(ParserConfig {
            mode: ParseMode::Naive,
            ..config
        })
        .parse_str(text)
        .unwrap();
        assert_eq!(naive.row_count(), 1);
        assert_eq!(naive.records[0].name(), Some("Asha"));
    }
}
