//! Format command - split saved advisory text into report blocks.

use std::path::PathBuf;

use insightplan::{HeadingKeywords, ReportFormatter};

use super::render;

pub fn run(
    file: PathBuf,
    keywords: Vec<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;

    let formatter = ReportFormatter::new(&HeadingKeywords::default().extend(keywords))?;
    let blocks = formatter.format(&text);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        render::print_report(&blocks);
    }

    Ok(())
}
