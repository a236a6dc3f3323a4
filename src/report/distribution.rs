//! Churn distribution table rendering.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::ChurnSummary;

/// Render the churn distribution as a table: one row per label class with
/// its count and one-decimal percentage, plus the total customer count.
pub fn display_distribution(summary: &ChurnSummary) {
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style("CHURN DISTRIBUTION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Customers").add_attribute(Attribute::Bold),
        Cell::new("Share").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("Retained").fg(Color::Green),
        Cell::new(summary.retained.count),
        Cell::new(format!("{:.1}%", summary.retained.percentage)),
    ]);

    table.add_row(vec![
        Cell::new("Churned").fg(Color::Red),
        Cell::new(summary.churned.count),
        Cell::new(format!("{:.1}%", summary.churned.percentage)),
    ]);

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        Cell::new("100.0%"),
    ]);

    // Indent the table
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
