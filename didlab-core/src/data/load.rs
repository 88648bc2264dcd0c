//! Raw panel ingestion.
//!
//! Reads the observation CSV (`date`, `revenue`, `dma`, `search_stays_on`,
//! `treatment_period`), derives log revenue, and rejects malformed rows
//! with typed errors instead of carrying NaNs downstream into the
//! estimator.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::data::Panel;
use crate::domain::{ExposureGroup, Observation, Period};

/// Errors from the panel loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open panel CSV {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed panel CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unparseable date '{value}' (expected YYYY-MM-DD or MM/DD/YYYY)")]
    InvalidDate { row: u64, value: String },

    #[error("row {row}: revenue must be a positive number, got {value}")]
    NonPositiveRevenue { row: u64, value: f64 },

    #[error("row {row}: flag column '{column}' must be 0 or 1, got {value}")]
    InvalidFlag {
        row: u64,
        column: &'static str,
        value: u8,
    },

    #[error("panel {path} contains no observations")]
    EmptyPanel { path: PathBuf },
}

/// Wire format of one CSV row. Matched to the header by name, so column
/// order in the file does not matter.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    revenue: f64,
    dma: String,
    search_stays_on: u8,
    treatment_period: u8,
}

/// Load and validate the raw observation panel.
pub fn load_panel(path: &Path) -> Result<Panel, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut observations = Vec::new();
    for (i, record) in reader.deserialize::<RawRecord>().enumerate() {
        // 1-based row number counting the header line.
        let row = i as u64 + 2;
        let raw = record?;

        let date = parse_date(&raw.date).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: raw.date.clone(),
        })?;
        if raw.revenue <= 0.0 || !raw.revenue.is_finite() {
            return Err(LoadError::NonPositiveRevenue {
                row,
                value: raw.revenue,
            });
        }
        let stays_on = parse_flag(raw.search_stays_on, "search_stays_on", row)?;
        let post = parse_flag(raw.treatment_period, "treatment_period", row)?;

        observations.push(Observation {
            dma: raw.dma,
            date,
            revenue: raw.revenue,
            log_revenue: raw.revenue.ln(),
            group: ExposureGroup::from_stays_on(stays_on),
            period: Period::from_flag(post),
        });
    }

    if observations.is_empty() {
        return Err(LoadError::EmptyPanel {
            path: path.to_path_buf(),
        });
    }
    Ok(Panel::new(observations))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()
}

fn parse_flag(value: u8, column: &'static str, row: u64) -> Result<bool, LoadError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(LoadError::InvalidFlag {
            row,
            column,
            value: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_panel_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = "\
date,revenue,dma,search_stays_on,treatment_period
2012-05-01,1000.0,500,0,0
2012-06-01,900.0,500,0,1
2012-05-01,2000.0,501,1,0
2012-06-01,2100.0,501,1,1
";

    #[test]
    fn loads_valid_panel() {
        let file = write_panel_csv(SAMPLE);
        let panel = load_panel(file.path()).unwrap();
        assert_eq!(panel.len(), 4);

        let first = &panel.observations()[0];
        assert_eq!(first.dma, "500");
        assert_eq!(first.group, ExposureGroup::Treated);
        assert_eq!(first.period, Period::Pre);
        assert!((first.log_revenue - 1000.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn accepts_slash_dates() {
        let file = write_panel_csv(
            "date,revenue,dma,search_stays_on,treatment_period\n05/01/2012,1000.0,500,0,0\n",
        );
        let panel = load_panel(file.path()).unwrap();
        assert_eq!(
            panel.observations()[0].date,
            NaiveDate::from_ymd_opt(2012, 5, 1).unwrap()
        );
    }

    #[test]
    fn rejects_bad_date() {
        let file = write_panel_csv(
            "date,revenue,dma,search_stays_on,treatment_period\nnot-a-date,1000.0,500,0,0\n",
        );
        let err = load_panel(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn rejects_non_positive_revenue() {
        let file = write_panel_csv(
            "date,revenue,dma,search_stays_on,treatment_period\n2012-05-01,0.0,500,0,0\n",
        );
        let err = load_panel(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::NonPositiveRevenue { row: 2, .. }));
    }

    #[test]
    fn rejects_bad_flag() {
        let file = write_panel_csv(
            "date,revenue,dma,search_stays_on,treatment_period\n2012-05-01,1000.0,500,2,0\n",
        );
        let err = load_panel(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidFlag {
                column: "search_stays_on",
                value: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_panel() {
        let file = write_panel_csv("date,revenue,dma,search_stays_on,treatment_period\n");
        let err = load_panel(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyPanel { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_panel(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
