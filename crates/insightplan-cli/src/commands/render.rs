//! Terminal rendering shared by the commands.

use colored::Colorize;
use indexmap::IndexMap;
use insightplan::{ColumnAverage, ReportBlock, Tier, TierGroups};

/// Print per-subject averages.
pub fn print_averages(averages: &IndexMap<String, ColumnAverage>) {
    println!("{}", "Average Marks per Subject".yellow().bold());
    if averages.is_empty() {
        println!("  {}", "No numeric columns found".dimmed());
    }
    for (subject, avg) in averages {
        println!(
            "  {:20} {:>7.2}  {}",
            subject,
            avg.average,
            format!("({} marks)", avg.count).dimmed()
        );
    }
}

/// Print students per tier.
pub fn print_tiers(tiers: &TierGroups) {
    println!("{}", "Performance Categories".yellow().bold());
    for (tier, names) in tiers.iter() {
        let label = match tier {
            Tier::Poor => tier.label().red(),
            Tier::Mid => tier.label().yellow(),
            Tier::Excellent => tier.label().green(),
        };
        println!(
            "  {:10} {:>4}  {}",
            label,
            names.len().to_string().white().bold(),
            names.join(", ")
        );
    }
    if !tiers.unclassified.is_empty() {
        println!(
            "  {:10} {:>4}  {}",
            "No marks".dimmed(),
            tiers.unclassified.len(),
            tiers.unclassified.join(", ")
        );
    }
}

/// Print advisory blocks.
pub fn print_report(blocks: &[ReportBlock]) {
    for block in blocks {
        match block {
            ReportBlock::Heading(text) => {
                println!();
                println!("{}", text.replace("**", "").trim().green().bold());
            }
            ReportBlock::Bullet(text) => println!("  🔹 {}", text),
            ReportBlock::NumberedItem(text) => println!("  {}", text.green()),
            ReportBlock::Plain(text) => println!("{}", text),
        }
    }
}
