//! Scorekit: Scorecard EDA CLI
//!
//! Loads a modelling dataset, profiles it, bins every numeric feature with
//! monotone bad rates, optionally evaluates a score column, and writes a
//! JSON report.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use scorekit::cli::Cli;
use scorekit::pipeline::{
    bin_features, correlation_matrix, dataset_stats, evaluate_score_column,
    extract_correlated_pairs, load_dataset, missing_stats, normalize_target_column,
    replace_blank, roc_for_score_column, summarize_all, BinningOptions, DuplicateEdges,
};
use scorekit::report::{
    display_binning_summary, display_buckets, display_correlated_pairs, display_evaluation,
    display_missing, display_summaries, report_metadata, EdaReport,
};
use scorekit::utils::progress::{finish_step, step_spinner};
use scorekit::utils::styling::{
    print_banner, print_completion, print_config, print_count, print_info, print_step_header,
    print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let duplicates: DuplicateEdges = cli
        .duplicates
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let options = BinningOptions {
        initial_bins: cli.bins,
        precision: cli.precision,
        duplicate_edges: duplicates,
    };

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.target,
        cli.score.as_deref(),
        cli.bins,
        cli.tiles,
    );

    let run_start = Instant::now();
    let mut report = EdaReport::new(report_metadata(
        &cli.input,
        &cli.target,
        cli.score.as_deref(),
        cli.bins,
        cli.tiles,
    ));

    // Step 1: Load dataset
    print_step_header(1, "Loading dataset");
    let spinner = step_spinner("Reading input file");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to collect dataset from {}", cli.input.display()))?;
    let stats = dataset_stats(&df);
    finish_step(
        &spinner,
        &format!(
            "Loaded {} rows x {} columns ({:.2} MB)",
            stats.rows, stats.columns, stats.memory_mb
        ),
    );
    report.rows = stats.rows;
    report.columns = stats.columns;

    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    if !column_names.contains(&cli.target) {
        anyhow::bail!(
            "Target column '{}' not found. Available columns: {}",
            cli.target,
            column_names.join(", ")
        );
    }

    // Step 2: Clean blank text cells
    print_step_header(2, "Cleaning blank values");
    let (mut df, replaced) = replace_blank(&df)?;
    report.blank_cells_nullified = replaced;
    if replaced > 0 {
        print_count("blank cells converted to null", replaced);
    } else {
        print_info("No blank text cells found");
    }

    // Step 3: Missing values
    print_step_header(3, "Profiling missing values");
    let missing = missing_stats(&df);
    display_missing(&missing);
    report.missing = missing;

    // Step 4: Descriptive statistics
    print_step_header(4, "Summarizing numeric columns");
    let summaries = summarize_all(&df)?;
    display_summaries(&summaries);
    report.summaries = summaries;

    // Step 5: Correlations
    print_step_header(5, "Computing correlations");
    match correlation_matrix(&df, Some(&cli.target)) {
        Ok(matrix) => {
            let pairs = extract_correlated_pairs(&matrix, cli.correlation_threshold);
            display_correlated_pairs(&pairs, cli.correlation_threshold);
            report.correlation = Some(matrix);
            report.correlated_pairs = pairs;
        }
        Err(e) => print_info(&format!("Correlation skipped: {}", e)),
    }

    // Step 6: Monotonic binning
    print_step_header(6, "Binning features (WOE / IV)");
    normalize_target_column(&mut df, &cli.target)
        .with_context(|| format!("Target column '{}' is not a valid binary target", cli.target))?;
    print_success("Target normalized to 0/1");

    let binnings = bin_features(&df, &cli.target, &options)?;
    if binnings.is_empty() {
        print_info("No feature produced a monotone binning");
    } else {
        display_binning_summary(&binnings);
        for fb in binnings.iter().take(cli.show_buckets) {
            println!();
            display_buckets(fb);
        }
    }
    report.binning = binnings;

    // Step 7: Score evaluation
    if let Some(score) = &cli.score {
        print_step_header(7, "Evaluating score (KS / lift / ROC)");
        let evaluation =
            evaluate_score_column(&df, score, &cli.target, cli.higher_is_worse, cli.tiles)?;
        display_evaluation(&evaluation);
        report.evaluation = Some(evaluation);

        match roc_for_score_column(&df, score, &cli.target, cli.higher_is_worse) {
            Ok(roc) => {
                println!(
                    "      AUC: {}",
                    style(format!("{:.4}", roc.auc)).green().bold()
                );
                report.roc = Some(roc);
            }
            Err(e) => print_info(&format!("ROC skipped: {}", e)),
        }
    }

    // Write the JSON report
    let report_path = cli.report_path();
    report.export(&report_path)?;

    println!();
    print_info(&format!(
        "Total time: {:.2}s",
        run_start.elapsed().as_secs_f64()
    ));
    print_completion(Some(&report_path));

    Ok(())
}
