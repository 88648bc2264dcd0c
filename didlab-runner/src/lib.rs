//! didlab runner — analysis orchestration, the DID estimator, reporting.
//!
//! This crate builds on `didlab-core` to provide:
//! - Analysis configuration with content-addressed run ids
//! - The preprocessing stage (pivot tables + descriptive figures)
//! - The closed-form DID estimator with its sampling error
//! - Artifact export: pivot CSVs, LaTeX table, PNG figures, run manifest

pub mod config;
pub mod estimator;
pub mod preprocess;
pub mod reporting;
pub mod runner;

pub use config::{AnalysisConfig, ConfigError, RunId};
pub use estimator::{estimate, estimate_from_diffs, DidEstimate, EstimateError};
pub use preprocess::{preprocess_panel, run_preprocess, PreprocessOutput, PreprocessSummary};
pub use runner::{run_analysis, run_estimate, AnalysisResult};
