//! didlab CLI — preprocess, estimate, and full-run commands.
//!
//! Commands:
//! - `preprocess` — pivot the raw panel and render the descriptive figures
//! - `estimate` — compute the DID estimate from the persisted pivot tables
//! - `run` — both stages in sequence plus the run manifest
//!
//! Every flag has a default reproducing the reference analysis (panel at
//! `input/PaidSearch.csv`, intermediates under `temp/`, artifacts under
//! `output/`, cutover 2012-05-22), so a bare `didlab run` is the canonical
//! invocation.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use didlab_runner::config::AnalysisConfig;
use didlab_runner::preprocess::{run_preprocess, PreprocessSummary};
use didlab_runner::runner::{run_analysis, run_estimate};

#[derive(Parser)]
#[command(
    name = "didlab",
    about = "didlab — difference-in-differences analysis of the paid-search revenue panel"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand; each one overrides a config field.
#[derive(Args)]
struct ConfigOpts {
    /// Path to a TOML config file overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raw panel CSV.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for the intermediate pivot tables.
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Directory for tables, figures, and the run manifest.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Intervention date (YYYY-MM-DD).
    #[arg(long)]
    cutover: Option<String>,
}

impl ConfigOpts {
    fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(temp_dir) = &self.temp_dir {
            config.temp_dir = temp_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(cutover) = &self.cutover {
            config.cutover_date = NaiveDate::parse_from_str(cutover, "%Y-%m-%d")?;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pivot the raw panel into per-unit tables and render the figures.
    Preprocess {
        #[command(flatten)]
        opts: ConfigOpts,

        /// Generate a deterministic synthetic panel instead of reading the
        /// input CSV.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Compute the DID estimate from the persisted pivot tables.
    Estimate {
        #[command(flatten)]
        opts: ConfigOpts,
    },
    /// Run both stages and write the run manifest.
    Run {
        #[command(flatten)]
        opts: ConfigOpts,

        /// Generate a deterministic synthetic panel instead of reading the
        /// input CSV.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess { opts, synthetic } => {
            let config = opts.resolve()?;
            let output = run_preprocess(&config, synthetic)?;
            print_preprocess_summary(&output.summary);
            println!(
                "Pivot tables written to: {}",
                config.temp_dir.display()
            );
            Ok(())
        }
        Commands::Estimate { opts } => {
            let config = opts.resolve()?;
            let estimate = run_estimate(&config)?;
            print!("{}", estimate.results_block());
            println!();
            println!("Table written to: {}", config.did_table_path().display());
            Ok(())
        }
        Commands::Run { opts, synthetic } => {
            let config = opts.resolve()?;
            let result = run_analysis(&config, synthetic)?;
            print_preprocess_summary(&result.summary);
            println!();
            print!("{}", result.estimate.results_block());
            println!();
            println!("Artifacts written to: {}", config.output_dir.display());
            Ok(())
        }
    }
}

fn print_preprocess_summary(summary: &PreprocessSummary) {
    println!("Treated DMAs: {}", summary.treated_units);
    println!("Untreated DMAs: {}", summary.control_units);
    println!(
        "Date range: {} to {}",
        summary.first_date, summary.last_date
    );
    for dma in &summary.treated_dropped {
        println!("WARNING: treated DMA {dma} lacks a pre or post period and was dropped");
    }
    for dma in &summary.control_dropped {
        println!("WARNING: control DMA {dma} lacks a pre or post period and was dropped");
    }
}
