//! Serializable analysis configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for an analysis run (content-addressable hash).
pub type RunId = String;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration for one end-to-end analysis run.
///
/// The defaults reproduce the reference analysis exactly: the raw panel at
/// `input/PaidSearch.csv`, intermediates under `temp/`, artifacts under
/// `output/`, and the 2012-05-22 cutover. A TOML file can override any
/// field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Raw panel CSV.
    pub input_path: PathBuf,

    /// Directory for the intermediate pivot tables.
    pub temp_dir: PathBuf,

    /// Directory for tables, figures, and the run manifest.
    pub output_dir: PathBuf,

    /// Date the treated DMAs' paid-search campaigns went dark. Drawn as the
    /// dashed marker on both figures.
    pub cutover_date: NaiveDate,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input/PaidSearch.csv"),
            temp_dir: PathBuf::from("temp"),
            output_dir: PathBuf::from("output"),
            cutover_date: NaiveDate::from_ymd_opt(2012, 5, 22).expect("valid constant date"),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file. Missing fields fall back to
    /// the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn treated_pivot_path(&self) -> PathBuf {
        self.temp_dir.join("treated_pivot.csv")
    }

    pub fn untreated_pivot_path(&self) -> PathBuf {
        self.temp_dir.join("untreated_pivot.csv")
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.output_dir.join("tables")
    }

    pub fn figures_dir(&self) -> PathBuf {
        self.output_dir.join("figures")
    }

    pub fn did_table_path(&self) -> PathBuf {
        self.tables_dir().join("did_table.tex")
    }

    pub fn figure_5_2_path(&self) -> PathBuf {
        self.figures_dir().join("figure_5_2.png")
    }

    pub fn figure_5_3_path(&self) -> PathBuf {
        self.figures_dir().join("figure_5_3.png")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join("manifest.json")
    }

    /// Computes a deterministic hash id for this configuration.
    ///
    /// Two runs with identical configs (over identical input) are the same
    /// analysis; the id ties the manifest back to its parameters.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("AnalysisConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_reference_layout() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("input/PaidSearch.csv"));
        assert_eq!(
            config.treated_pivot_path(),
            PathBuf::from("temp/treated_pivot.csv")
        );
        assert_eq!(
            config.untreated_pivot_path(),
            PathBuf::from("temp/untreated_pivot.csv")
        );
        assert_eq!(
            config.did_table_path(),
            PathBuf::from("output/tables/did_table.tex")
        );
        assert_eq!(
            config.figure_5_2_path(),
            PathBuf::from("output/figures/figure_5_2.png")
        );
        assert_eq!(
            config.cutover_date,
            NaiveDate::from_ymd_opt(2012, 5, 22).unwrap()
        );
    }

    #[test]
    fn run_id_is_deterministic() {
        let config = AnalysisConfig::default();
        assert_eq!(config.run_id(), config.run_id());
        assert!(!config.run_id().is_empty());
    }

    #[test]
    fn run_id_changes_with_params() {
        let base = AnalysisConfig::default();
        let mut changed = base.clone();
        changed.cutover_date = NaiveDate::from_ymd_opt(2012, 6, 1).unwrap();
        assert_ne!(base.run_id(), changed.run_id());
    }

    #[test]
    fn toml_roundtrip() {
        let config = AnalysisConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AnalysisConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let parsed: AnalysisConfig = toml::from_str("cutover_date = \"2013-01-15\"").unwrap();
        assert_eq!(
            parsed.cutover_date,
            NaiveDate::from_ymd_opt(2013, 1, 15).unwrap()
        );
        assert_eq!(parsed.input_path, PathBuf::from("input/PaidSearch.csv"));
    }

    #[test]
    fn from_file_reads_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input_path = \"data/panel.csv\"").unwrap();
        writeln!(file, "output_dir = \"out\"").unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.input_path, PathBuf::from("data/panel.csv"));
        assert_eq!(config.did_table_path(), PathBuf::from("out/tables/did_table.tex"));
    }

    #[test]
    fn from_file_missing_reports_path() {
        let err = AnalysisConfig::from_file(Path::new("no/such/config.toml")).unwrap_err();
        assert!(err.to_string().contains("no/such/config.toml"));
    }
}
