//! Scorekit: scorecard exploration toolkit
//!
//! Profiles a modelling dataset (missing values, descriptive statistics,
//! correlations), bins numeric features with monotone bad rates to compute
//! WOE and Information Value, and evaluates score columns with KS, lift
//! and ROC.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
