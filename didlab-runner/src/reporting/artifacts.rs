//! Pivot table and run manifest artifacts.
//!
//! The pivot CSVs are the only coupling between the two pipeline stages:
//! the preprocessor writes them, the estimator reads them back. Floats are
//! written with Rust's shortest round-trip formatting, so a value survives
//! the disk hop exactly and identical inputs produce byte-identical files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use didlab_core::domain::UnitPivotRow;

use crate::estimator::DidEstimate;

/// Write a pivot table keyed by DMA.
///
/// Rows are written in the order given; the pivot orders them by unit id.
pub fn write_pivot_csv(path: &Path, rows: &[UnitPivotRow]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create pivot CSV {}", path.display()))?;
    writeln!(file, "dma,log_revenue_pre,log_revenue_post,log_revenue_diff")?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{}",
            row.dma, row.log_revenue_pre, row.log_revenue_post, row.log_revenue_diff
        )?;
    }
    Ok(())
}

/// Read a pivot table written by [`write_pivot_csv`].
pub fn read_pivot_csv(path: &Path) -> Result<Vec<UnitPivotRow>> {
    let file =
        File::open(path).with_context(|| format!("failed to open pivot CSV {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for record in reader.deserialize::<UnitPivotRow>() {
        rows.push(record.with_context(|| format!("malformed pivot row in {}", path.display()))?);
    }
    Ok(rows)
}

/// Run record written next to the output artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub dataset_hash: String,
    pub synthetic: bool,
    pub treated_units: usize,
    pub control_units: usize,
    pub treated_dropped: usize,
    pub control_dropped: usize,
    pub estimate: DidEstimate,
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}
