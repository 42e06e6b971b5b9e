//! Line classification for advisory text.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Numbered list items such as "1." or "12.".
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// Keywords used when nothing else is configured.
pub const DEFAULT_HEADING_KEYWORDS: &[&str] = &[
    "Subject", "General", "Tip", "Tips", "Math", "Science", "English", "Hindi", "Computer",
];

/// Words that mark a line as a section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingKeywords {
    /// Keywords matched as whole words at the start of a line.
    pub words: Vec<String>,
    /// Whether matching ignores case.
    #[serde(default)]
    pub case_insensitive: bool,
}

impl HeadingKeywords {
    /// Create an empty keyword set. No line will be a heading.
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            case_insensitive: false,
        }
    }

    /// Add a keyword, ignoring blanks and duplicates.
    pub fn with(mut self, word: impl Into<String>) -> Self {
        self.push(word);
        self
    }

    /// Add several keywords.
    pub fn extend<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.push(word);
        }
        self
    }

    /// Match keywords regardless of case.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    fn push(&mut self, word: impl Into<String>) {
        let word = word.into().trim().to_string();
        if !word.is_empty() && !self.words.contains(&word) {
            self.words.push(word);
        }
    }
}

impl Default for HeadingKeywords {
    fn default() -> Self {
        Self::empty().extend(DEFAULT_HEADING_KEYWORDS.iter().copied())
    }
}

/// One renderable unit of advisory text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ReportBlock {
    /// Section title, kept verbatim.
    Heading(String),
    /// Bullet point with its marker removed.
    Bullet(String),
    /// Numbered item including its number.
    NumberedItem(String),
    /// Anything else, including blank lines.
    Plain(String),
}

impl ReportBlock {
    /// The block payload.
    pub fn text(&self) -> &str {
        match self {
            ReportBlock::Heading(text)
            | ReportBlock::Bullet(text)
            | ReportBlock::NumberedItem(text)
            | ReportBlock::Plain(text) => text,
        }
    }

    /// The payload with its list marker restored.
    pub fn source_line(&self) -> String {
        match self {
            ReportBlock::Bullet(text) => format!("- {}", text),
            other => other.text().to_string(),
        }
    }
}

/// Splits advisory text into [`ReportBlock`]s.
///
/// The formatter never fails on input; unrecognized lines become
/// [`ReportBlock::Plain`].
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    heading: Option<Regex>,
}

impl ReportFormatter {
    /// Build a formatter for a keyword set.
    pub fn new(keywords: &HeadingKeywords) -> Result<Self> {
        if keywords.words.is_empty() {
            return Ok(Self { heading: None });
        }

        let alternatives = keywords
            .words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");

        // Optional "#", ordinal or bullet marker, and emphasis before the keyword.
        let pattern = format!(
            r"^\s*(?:#{{1,6}}\s*)?(?:(?:\d+\.|[-•])\s*)?(?:\*\*|__)?\s*(?:{})(?:[^\p{{L}}\p{{N}}_]|$)",
            alternatives
        );
        let heading = RegexBuilder::new(&pattern)
            .case_insensitive(keywords.case_insensitive)
            .build()?;

        Ok(Self {
            heading: Some(heading),
        })
    }

    /// A formatter without heading keywords; only the bullet and numbered
    /// rules apply.
    pub fn plain() -> Self {
        Self { heading: None }
    }

    /// Build a formatter with [`DEFAULT_HEADING_KEYWORDS`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(&HeadingKeywords::default())
    }

    /// Classify a single line.
    pub fn classify_line(&self, line: &str) -> ReportBlock {
        if self.heading.as_ref().is_some_and(|re| re.is_match(line)) {
            return ReportBlock::Heading(line.to_string());
        }

        let trimmed = line.trim();
        if let Some(rest) = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('•'))
        {
            return ReportBlock::Bullet(rest.trim_start().to_string());
        }

        if NUMBERED_ITEM.is_match(trimmed) {
            return ReportBlock::NumberedItem(line.to_string());
        }

        ReportBlock::Plain(line.to_string())
    }

    /// Classify every line of `text`, in order.
    ///
    /// Empty input produces no blocks; blank lines inside the text become
    /// empty [`ReportBlock::Plain`] blocks.
    pub fn format(&self, text: &str) -> Vec<ReportBlock> {
        if text.is_empty() {
            return Vec::new();
        }

        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| self.classify_line(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> ReportFormatter {
        ReportFormatter::with_defaults().unwrap()
    }

    #[test]
    fn test_advisory_sample() {
        let text = "**Math 🤔**: 61.65%\n- tip one\n1. tip two\nplain line";
        let blocks = formatter().format(text);

        assert_eq!(
            blocks,
            vec![
                ReportBlock::Heading("**Math 🤔**: 61.65%".to_string()),
                ReportBlock::Bullet("tip one".to_string()),
                ReportBlock::NumberedItem("1. tip two".to_string()),
                ReportBlock::Plain("plain line".to_string()),
            ]
        );
    }

    #[test]
    fn test_heading_variants() {
        let f = formatter();
        assert!(matches!(f.classify_line("Math: 55%"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("1. Science"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("- English"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("• Hindi"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("## General Improvement Tips 💪"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("**Tips**"), ReportBlock::Heading(_)));
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        let f = formatter();
        assert!(matches!(f.classify_line("Mathematics rocks"), ReportBlock::Plain(_)));
        assert!(matches!(f.classify_line("Tipping point"), ReportBlock::Plain(_)));
    }

    #[test]
    fn test_keywords_are_case_sensitive_by_default() {
        let f = formatter();
        assert_eq!(f.classify_line("math later"), ReportBlock::Plain("math later".into()));

        let insensitive =
            ReportFormatter::new(&HeadingKeywords::default().case_insensitive(true)).unwrap();
        assert!(matches!(insensitive.classify_line("math later"), ReportBlock::Heading(_)));
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = HeadingKeywords::empty().with("Physics").with("C++");
        let f = ReportFormatter::new(&keywords).unwrap();

        assert!(matches!(f.classify_line("**Physics 🔭**: 70%"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("C++ basics"), ReportBlock::Heading(_)));
        assert!(matches!(f.classify_line("Math: 55%"), ReportBlock::Plain(_)));
    }

    #[test]
    fn test_empty_keyword_set_has_no_headings() {
        let f = ReportFormatter::new(&HeadingKeywords::empty()).unwrap();
        assert_eq!(f.classify_line("Math"), ReportBlock::Plain("Math".into()));
    }

    #[test]
    fn test_bullet_markers() {
        let f = formatter();
        assert_eq!(f.classify_line("  -   revise daily"), ReportBlock::Bullet("revise daily".into()));
        assert_eq!(f.classify_line("•practice"), ReportBlock::Bullet("practice".into()));
        assert_eq!(f.classify_line("---"), ReportBlock::Bullet("--".into()));
    }

    #[test]
    fn test_numbered_item_keeps_line() {
        let f = formatter();
        assert_eq!(
            f.classify_line("  12. sleep well"),
            ReportBlock::NumberedItem("  12. sleep well".into())
        );
        assert_eq!(f.classify_line("12 apples"), ReportBlock::Plain("12 apples".into()));
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let blocks = formatter().format("first\n\nsecond\r\n");
        assert_eq!(
            blocks,
            vec![
                ReportBlock::Plain("first".into()),
                ReportBlock::Plain(String::new()),
                ReportBlock::Plain("second".into()),
                ReportBlock::Plain(String::new()),
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(formatter().format("").is_empty());
    }

    #[test]
    fn test_source_line_restores_marker() {
        assert_eq!(ReportBlock::Bullet("tip".into()).source_line(), "- tip");
        assert_eq!(ReportBlock::NumberedItem("1. a".into()).source_line(), "1. a");
    }

    #[test]
    fn test_keyword_dedup() {
        let keywords = HeadingKeywords::default().with("Math").with("  ").with("Art");
        assert_eq!(keywords.words.iter().filter(|w| *w == "Math").count(), 1);
        assert_eq!(keywords.words.last().map(String::as_str), Some("Art"));
    }

    #[test]
    fn test_plain_formatter_has_no_headings() {
        let blocks = ReportFormatter::plain().format("Math: 55%\n- revise\n2. practice");
        assert_eq!(
            blocks,
            vec![
                ReportBlock::Plain("Math: 55%".into()),
                ReportBlock::Bullet("revise".into()),
                ReportBlock::NumberedItem("2. practice".into()),
            ]
        );
    }
}
