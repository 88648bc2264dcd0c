//! Figure rendering — the two descriptive time-series charts.
//!
//! Figure 5.2 plots mean raw revenue per day for each exposure group;
//! figure 5.3 plots the daily control-minus-treated log-revenue gap. Both
//! carry a dashed vertical marker at the cutover date. These charts have no
//! downstream numeric consumers.

mod chart;
mod png;

use std::path::Path;

use anyhow::{Context, Result};

use didlab_core::data::Panel;
use didlab_core::domain::ExposureGroup;
use didlab_core::series::{daily_log_revenue_gap, daily_mean_revenue, DailyPoint};

use crate::config::AnalysisConfig;

pub use chart::{ChartSeries, LineChart};
pub use png::svg_to_png;

const CONTROL_COLOR: &str = "#1f77b4";
const TREATMENT_COLOR: &str = "#d62728";

/// Render both figures into the configured figures directory.
pub fn render_figures(panel: &Panel, config: &AnalysisConfig) -> Result<()> {
    let figures_dir = config.figures_dir();
    std::fs::create_dir_all(&figures_dir)
        .with_context(|| format!("failed to create figures dir {}", figures_dir.display()))?;

    let control = to_points(daily_mean_revenue(panel, ExposureGroup::Control));
    let treated = to_points(daily_mean_revenue(panel, ExposureGroup::Treated));
    let revenue_chart = LineChart {
        title: "Figure 5.2: Average Revenue Over Time",
        x_label: "Date",
        y_label: "Revenue",
        series: vec![
            ChartSeries {
                label: "Control (search stays on)",
                color: CONTROL_COLOR,
                points: &control,
            },
            ChartSeries {
                label: "Treatment (search goes off)",
                color: TREATMENT_COLOR,
                points: &treated,
            },
        ],
        vline: Some(config.cutover_date),
    };
    write_png(&revenue_chart, &config.figure_5_2_path())?;

    let gap = to_points(daily_log_revenue_gap(panel));
    let gap_chart = LineChart {
        title: "Figure 5.3: Log Revenue Difference Over Time",
        x_label: "Date",
        y_label: "log(rev_control) - log(rev_treat)",
        series: vec![ChartSeries {
            label: "Control minus treatment",
            color: CONTROL_COLOR,
            points: &gap,
        }],
        vline: Some(config.cutover_date),
    };
    write_png(&gap_chart, &config.figure_5_3_path())
}

fn to_points(series: Vec<DailyPoint>) -> Vec<(chrono::NaiveDate, f64)> {
    series.into_iter().map(|p| (p.date, p.value)).collect()
}

fn write_png(chart: &LineChart<'_>, path: &Path) -> Result<()> {
    let bytes = svg_to_png(&chart.to_svg(), 2.0)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write figure {}", path.display()))
}
