//! Progress indicators for the analysis steps

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while an indeterminate pipeline step runs
pub fn step_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("   {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Bar tracking per-feature work, one tick per column
pub fn feature_bar(len: u64, verb: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "   {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} features ({{percent}}%) [{{eta}}]",
                verb
            ))
            .unwrap()
            .progress_chars("=>-"),
    );
    pb
}

/// Finish a step's indicator with a success line
pub fn finish_step(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("[OK] {}", message));
}
