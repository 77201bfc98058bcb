//! Terminal styling utilities for the CLI output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗ ██████╗ ██████╗ ██████╗ ███████╗██╗  ██╗██╗████████╗
    ██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔════╝██║ ██╔╝██║╚══██╔══╝
    ███████╗██║     ██║   ██║██████╔╝█████╗  █████╔╝ ██║   ██║
    ╚════██║██║     ██║   ██║██╔══██╗██╔══╝  ██╔═██╗ ██║   ██║
    ███████║╚██████╗╚██████╔╝██║  ██║███████╗██║  ██╗██║   ██║
    ╚══════╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚═╝   ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Scorecard exploration and monotonic binning").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, target: &str, score: Option<&str>, bins: usize, tiles: usize) {
    println!("    {}", style("Configuration").cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      {} Input:  {}", FOLDER, input.display());
    println!("      {} Target: {}", TARGET, target);
    if let Some(score) = score {
        println!("      {} Score:  {}", CHART, score);
    }
    println!(
        "      Initial bins: {}   Evaluation tiles: {}",
        style(bins).yellow(),
        style(tiles).yellow()
    );
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

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!(
        "      Found {} {}",
        style(count).yellow().bold(),
        description
    );
}

/// Print the final completion message
pub fn print_completion(output: Option<&Path>) {
    println!();
    if let Some(path) = output {
        println!("    {} Report written to {}", SAVE, path.display());
    }
    println!(
        "    {} {}",
        ROCKET,
        style("Analysis complete!").green().bold()
    );
    println!();
}
