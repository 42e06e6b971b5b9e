//! Formatting of free-text advisory reports into display blocks.

mod formatter;

pub use formatter::{HeadingKeywords, ReportBlock, ReportFormatter, DEFAULT_HEADING_KEYWORDS};
