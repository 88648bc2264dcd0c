//! Preprocessing stage — raw panel to pivot tables and figures.
//!
//! Loads (or synthesizes) the observation panel, partitions it by exposure
//! group, pivots each group to per-unit pre/post means, persists the two
//! pivot CSVs, and renders the descriptive figures. The estimator never
//! sees the raw panel; the pivot CSVs are the only hand-off.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use didlab_core::data::{generate_synthetic_panel, load_panel, Panel, SyntheticPanelSpec};
use didlab_core::domain::ExposureGroup;
use didlab_core::pivot::{pivot_group, GroupPivot};

use crate::config::AnalysisConfig;
use crate::reporting::{artifacts, figures};

/// What the preprocessor observed and produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessSummary {
    pub treated_units: usize,
    pub control_units: usize,
    /// Unit ids excluded for lacking a pre or post period, per group.
    pub treated_dropped: Vec<String>,
    pub control_dropped: Vec<String>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub observation_count: usize,
    pub dataset_hash: String,
    pub synthetic: bool,
}

/// Preprocessing output: the summary plus the in-memory pivots, so callers
/// chaining straight into estimation can skip the disk round trip in tests.
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    pub summary: PreprocessSummary,
    pub treated: GroupPivot,
    pub control: GroupPivot,
}

/// Load the panel from disk (or synthesize one) and preprocess it.
pub fn run_preprocess(config: &AnalysisConfig, synthetic: bool) -> Result<PreprocessOutput> {
    let panel = if synthetic {
        eprintln!(
            "WARNING: generating a synthetic panel — results do not reflect the real experiment"
        );
        let spec = SyntheticPanelSpec {
            cutover: config.cutover_date,
            ..SyntheticPanelSpec::default()
        };
        generate_synthetic_panel("didlab", &spec)
    } else {
        load_panel(&config.input_path)?
    };
    preprocess_panel(&panel, config, synthetic)
}

/// Run the preprocessing stage against an already-loaded panel.
pub fn preprocess_panel(
    panel: &Panel,
    config: &AnalysisConfig,
    synthetic: bool,
) -> Result<PreprocessOutput> {
    let treated = pivot_group(panel.group(ExposureGroup::Treated));
    let control = pivot_group(panel.group(ExposureGroup::Control));

    std::fs::create_dir_all(&config.temp_dir)
        .with_context(|| format!("failed to create temp dir {}", config.temp_dir.display()))?;
    artifacts::write_pivot_csv(&config.treated_pivot_path(), &treated.rows)?;
    artifacts::write_pivot_csv(&config.untreated_pivot_path(), &control.rows)?;

    figures::render_figures(panel, config)?;

    let (first_date, last_date) = panel
        .date_range()
        .context("panel has no observations")?;

    let summary = PreprocessSummary {
        treated_units: treated.rows.len(),
        control_units: control.rows.len(),
        treated_dropped: treated.dropped.clone(),
        control_dropped: control.dropped.clone(),
        first_date,
        last_date,
        observation_count: panel.len(),
        dataset_hash: panel.dataset_hash(),
        synthetic,
    };

    Ok(PreprocessOutput {
        summary,
        treated,
        control,
    })
}
