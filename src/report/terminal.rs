use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{LicenseRecord, Rating};

/// Render the console report: header, one table row per record, tier summary.
pub fn render(records: &[LicenseRecord], path: &Path, quiet: bool) {
    if quiet {
        println!("{}", summary_line(records));
        return;
    }

    println!(
        "\n {} v{}",
        "license-rater".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", path.display());

    if records.is_empty() {
        println!(" No packages or dependencies found.");
        return;
    }

    println!("{}", build_table(records));
    println!("\n {}", summary_line(records));
}

/// Package / License / Rating table, rows in input order.
pub fn build_table(records: &[LicenseRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Rating").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        let (label, color) = match record.rating {
            Rating::Trusted => ("✓ Trusted", Color::Green),
            Rating::Caution => ("⚠ Caution", Color::Yellow),
            Rating::Risky => ("✗ Risky", Color::Red),
        };
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.license),
            Cell::new(label).fg(color),
        ]);
    }

    table
}

fn summary_line(records: &[LicenseRecord]) -> String {
    let count = |rating: Rating| records.iter().filter(|r| r.rating == rating).count();
    format!(
        "Total: {}  Trusted: {}  Caution: {}  Risky: {}",
        records.len(),
        count(Rating::Trusted).to_string().green(),
        count(Rating::Caution).to_string().yellow(),
        count(Rating::Risky).to_string().red(),
    )
}
