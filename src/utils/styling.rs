//! Terminal styling utilities for a modern, visually appealing TUI

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SEED: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static FOREST: Emoji<'_, '_> = Emoji("🌲 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗██╗  ██╗██╗   ██╗██████╗ ███╗   ██╗
    ██╔════╝██║  ██║██║   ██║██╔══██╗████╗  ██║
    ██║     ███████║██║   ██║██████╔╝██╔██╗ ██║
    ██║     ██╔══██║██║   ██║██╔══██╗██║╚██╗██║
    ╚██████╗██║  ██║╚██████╔╝██║  ██║██║ ╚████║
     ╚═════╝╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═══╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("σ").magenta().bold(),
        style("Bank customer churn prediction").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, seed: u64, trees: usize) {
    println!(
        "    {} Input: {}",
        FOLDER,
        style(truncate_path(input, 44)).white()
    );
    println!("    {} Seed:  {}", SEED, style(seed).yellow());
    println!("    {} Trees: {}", FOREST, style(trees).yellow());
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a recoverable query error inline, without aborting the session
pub fn print_query_error(message: &str) {
    println!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Churnscope session complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

/// Keep the last `max_len - 3` characters behind an ellipsis. Cuts on a
/// char boundary, so multibyte paths never panic the slice.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    if keep == 0 {
        return "...".to_string();
    }
    let tail_start = s
        .char_indices()
        .rev()
        .nth(keep - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("...{}", &s[tail_start..])
}
