//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Scorekit - Scorecard EDA with monotonic WOE/IV binning and KS/lift evaluation
#[derive(Parser, Debug)]
#[command(name = "scorekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column name. Must hold binary 0/1 values or the
    /// labels "good"/"bad".
    #[arg(short, long)]
    pub target: String,

    /// Score column to evaluate with KS/lift and ROC.
    /// When omitted, evaluation is skipped.
    #[arg(short, long)]
    pub score: Option<String>,

    /// Score direction: set when higher score values indicate worse risk
    /// (e.g. probability of default). Unset means higher is safer.
    #[arg(long, default_value = "false")]
    pub higher_is_worse: bool,

    /// Initial quantile bucket count for monotonic binning.
    /// The search coarsens from here until the bad rate is monotone.
    #[arg(long, default_value = "20")]
    pub bins: usize,

    /// Decimal places for reported cut points
    #[arg(long, default_value = "3")]
    pub precision: u32,

    /// Duplicate quantile edge policy: "raise" or "drop"
    #[arg(long, default_value = "raise")]
    pub duplicates: String,

    /// Number of equal-population tiles for score evaluation
    #[arg(long, default_value = "10")]
    pub tiles: usize,

    /// Correlation magnitude above which column pairs are reported
    #[arg(long, default_value = "0.7", value_parser = validate_correlation_threshold)]
    pub correlation_threshold: f64,

    /// Output path for the JSON report.
    /// Defaults to the input directory with an '_eda.json' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Number of top features whose bucket tables are printed
    #[arg(long, default_value = "5")]
    pub show_buckets: usize,
}

impl Cli {
    /// Report path, derived from the input file when not explicitly given.
    pub fn report_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self
                .input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_eda.json", stem))
        })
    }
}

fn validate_correlation_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "correlation_threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
