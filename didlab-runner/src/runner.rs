//! End-to-end analysis runner.
//!
//! The two stages share nothing but the pivot CSVs on disk: `run_estimate`
//! reads the files `run_preprocess` wrote, never the raw panel, so either
//! stage can be re-run independently.

use anyhow::{Context, Result};

use crate::config::{AnalysisConfig, RunId};
use crate::estimator::{self, DidEstimate};
use crate::preprocess::{run_preprocess, PreprocessSummary};
use crate::reporting::{artifacts, latex};

/// Outcome of a full analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub run_id: RunId,
    pub summary: PreprocessSummary,
    pub estimate: DidEstimate,
}

/// Estimation stage: read the persisted pivot tables, compute the estimate,
/// and write the LaTeX results table.
pub fn run_estimate(config: &AnalysisConfig) -> Result<DidEstimate> {
    let treated = artifacts::read_pivot_csv(&config.treated_pivot_path())?;
    let control = artifacts::read_pivot_csv(&config.untreated_pivot_path())?;
    let estimate = estimator::estimate(&treated, &control)?;

    let tables_dir = config.tables_dir();
    std::fs::create_dir_all(&tables_dir)
        .with_context(|| format!("failed to create tables dir {}", tables_dir.display()))?;
    std::fs::write(config.did_table_path(), latex::did_table(&estimate)).with_context(|| {
        format!(
            "failed to write LaTeX table {}",
            config.did_table_path().display()
        )
    })?;

    Ok(estimate)
}

/// Run both stages in sequence and write the run manifest.
pub fn run_analysis(config: &AnalysisConfig, synthetic: bool) -> Result<AnalysisResult> {
    let preprocessed = run_preprocess(config, synthetic)?;
    let estimate = run_estimate(config)?;

    let run_id = config.run_id();
    let manifest = artifacts::RunManifest {
        run_id: run_id.clone(),
        dataset_hash: preprocessed.summary.dataset_hash.clone(),
        synthetic: preprocessed.summary.synthetic,
        treated_units: preprocessed.summary.treated_units,
        control_units: preprocessed.summary.control_units,
        treated_dropped: preprocessed.summary.treated_dropped.len(),
        control_dropped: preprocessed.summary.control_dropped.len(),
        estimate: estimate.clone(),
    };
    artifacts::write_manifest(&config.manifest_path(), &manifest)?;

    Ok(AnalysisResult {
        run_id,
        summary: preprocessed.summary,
        estimate,
    })
}
