//! Example: Analyze a marks file with InsightPlan.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- marks.csv

use std::env;
use std::path::Path;

use insightplan::{InsightPlan, MockProvider, ReportBlock};

fn main() -> insightplan::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    // Mock gateway so the example runs without an API key
    let planner = InsightPlan::new().with_gateway(MockProvider::new());
    let session = planner.analyze(path)?;

    println!("## Average Marks per Subject");
    for (subject, avg) in &session.averages {
        println!("  {:15} {:>7.2}", subject, avg.average);
    }
    println!();

    println!("## Performance Categories");
    for (tier, names) in session.tiers.iter() {
        println!("  {:10} {:>3}  {}", tier.label(), names.len(), names.join(", "));
    }
    println!();

    println!("## Study Tips");
    for block in &session.report {
        match block {
            ReportBlock::Heading(text) => println!("\n{}", text),
            ReportBlock::Bullet(text) => println!("  * {}", text),
            ReportBlock::NumberedItem(text) => println!("  {}", text),
            ReportBlock::Plain(text) => println!("{}", text),
        }
    }

    Ok(())
}
