//! Terminal table rendering of analysis results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{
    ColumnSummary, CorrelatedPair, FeatureBinning, MissingStat, RankEvalResult,
};

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn fmt_rate(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn fmt_num(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}", value)
    } else {
        value.to_string()
    }
}

/// Render the missing-value profile; prints a short note when the frame is
/// complete.
pub fn display_missing(stats: &[MissingStat]) {
    if stats.is_empty() {
        println!("      {}", style("No missing values found").green());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
        Cell::new("Rate").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
    ]);

    for stat in stats {
        let color = if stat.missing_rate > 0.5 {
            Color::Red
        } else if stat.missing_rate > 0.2 {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(&stat.column),
            Cell::new(stat.missing),
            Cell::new(fmt_rate(stat.missing_rate)).fg(color),
            Cell::new(&stat.dtype),
        ]);
    }

    print_indented(&table);
}

/// Render descriptive statistics for the numeric columns.
pub fn display_summaries(summaries: &[ColumnSummary]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Std").add_attribute(Attribute::Bold),
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("25%").add_attribute(Attribute::Bold),
        Cell::new("50%").add_attribute(Attribute::Bold),
        Cell::new("75%").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.column),
            Cell::new(s.count),
            Cell::new(fmt_num(s.mean)),
            Cell::new(fmt_num(s.std)),
            Cell::new(fmt_num(s.min)),
            Cell::new(fmt_num(s.q25)),
            Cell::new(fmt_num(s.median)),
            Cell::new(fmt_num(s.q75)),
            Cell::new(fmt_num(s.max)),
        ]);
    }

    print_indented(&table);
}

/// Render the correlated pairs above the threshold.
pub fn display_correlated_pairs(pairs: &[CorrelatedPair], threshold: f64) {
    if pairs.is_empty() {
        println!(
            "      {}",
            style(format!("No pairs above |r| = {:.2}", threshold)).green()
        );
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature 1").add_attribute(Attribute::Bold),
        Cell::new("Feature 2").add_attribute(Attribute::Bold),
        Cell::new("Correlation").add_attribute(Attribute::Bold),
    ]);

    for pair in pairs {
        let color = if pair.correlation.abs() > 0.9 {
            Color::Red
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(&pair.feature1),
            Cell::new(&pair.feature2),
            Cell::new(format!("{:+.4}", pair.correlation)).fg(color),
        ]);
    }

    print_indented(&table);
}

/// Render the binning leaderboard: one row per feature, IV descending.
pub fn display_binning_summary(binnings: &[FeatureBinning]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Buckets").add_attribute(Attribute::Bold),
        Cell::new("IV").add_attribute(Attribute::Bold),
    ]);

    for fb in binnings {
        let iv = fb.binning.iv_sum;
        let color = if !iv.is_finite() {
            Color::Magenta
        } else if iv > 0.3 {
            Color::Green
        } else if iv > 0.1 {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(&fb.feature),
            Cell::new(fb.binning.buckets.len()),
            Cell::new(fmt_num(iv)).fg(color),
        ]);
    }

    print_indented(&table);
}

/// Render the bucket detail of one feature's binning.
pub fn display_buckets(fb: &FeatureBinning) {
    println!("      {}", style(&fb.feature).white().bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("Bad rate").add_attribute(Attribute::Bold),
        Cell::new("WOE").add_attribute(Attribute::Bold),
        Cell::new("IV").add_attribute(Attribute::Bold),
    ]);

    for bucket in &fb.binning.buckets {
        table.add_row(vec![
            Cell::new(fmt_num(bucket.min)),
            Cell::new(fmt_num(bucket.max)),
            Cell::new(bucket.total),
            Cell::new(fmt_rate(bucket.bad_rate)),
            Cell::new(fmt_num(bucket.woe)),
            Cell::new(fmt_num(bucket.iv)),
        ]);
    }

    print_indented(&table);
}

/// Render the tile table from a score evaluation, KS maximum highlighted.
pub fn display_evaluation(result: &RankEvalResult) {
    let max_ks = result.max_ks();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Tile").add_attribute(Attribute::Bold),
        Cell::new("Good").add_attribute(Attribute::Bold),
        Cell::new("Bad").add_attribute(Attribute::Bold),
        Cell::new("Bad rate").add_attribute(Attribute::Bold),
        Cell::new("Cum bad rate").add_attribute(Attribute::Bold),
        Cell::new("Lift").add_attribute(Attribute::Bold),
        Cell::new("KS").add_attribute(Attribute::Bold),
    ]);

    // Skip the synthetic origin row in terminal output
    for tile in &result.tiles[1..] {
        let ks_cell = if tile.ks == max_ks {
            Cell::new(fmt_num(tile.ks))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(fmt_num(tile.ks))
        };
        table.add_row(vec![
            Cell::new(format!("{:.2}", tile.tile)),
            Cell::new(tile.good),
            Cell::new(tile.bad),
            Cell::new(fmt_rate(tile.bad_rate)),
            Cell::new(fmt_rate(tile.cum_bad_rate)),
            Cell::new(fmt_num(tile.lift)),
            ks_cell,
        ]);
    }

    print_indented(&table);
    println!(
        "      Max KS: {}",
        style(format!("{:.4}", max_ks)).green().bold()
    );
}
