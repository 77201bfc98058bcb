//! JSON export of the full analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    ColumnSummary, CorrelatedPair, CorrelationMatrix, FeatureBinning, MissingStat, RankEvalResult,
    RocCurve,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    pub version: String,
    pub input_file: String,
    pub target_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_column: Option<String>,
    pub initial_bins: usize,
    pub tile_count: usize,
}

/// Complete analysis report written as JSON
#[derive(Serialize)]
pub struct EdaReport {
    pub metadata: ReportMetadata,
    pub rows: usize,
    pub columns: usize,
    pub blank_cells_nullified: usize,
    pub missing: Vec<MissingStat>,
    pub summaries: Vec<ColumnSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
    pub correlated_pairs: Vec<CorrelatedPair>,
    pub binning: Vec<FeatureBinning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<RankEvalResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc: Option<RocCurve>,
}

impl EdaReport {
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            rows: 0,
            columns: 0,
            blank_cells_nullified: 0,
            missing: Vec::new(),
            summaries: Vec::new(),
            correlation: None,
            correlated_pairs: Vec::new(),
            binning: Vec::new(),
            evaluation: None,
            roc: None,
        }
    }

    /// Write the report to a JSON file.
    pub fn export(&self, output_path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize report to JSON")?;

        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

        Ok(())
    }
}

pub fn report_metadata(
    input: &Path,
    target: &str,
    score: Option<&str>,
    initial_bins: usize,
    tile_count: usize,
) -> ReportMetadata {
    ReportMetadata {
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input_file: input.display().to_string(),
        target_column: target.to_string(),
        score_column: score.map(|s| s.to_string()),
        initial_bins,
        tile_count,
    }
}
