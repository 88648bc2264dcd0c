//! Minimal SVG line charts for the descriptive figures.
//!
//! Builds the SVG document directly; rasterization happens in `png.rs`.
//! Covers exactly what the two panel figures need: a linear y axis with
//! auto-placed ticks, date ticks on the x axis, solid polylines, one dashed
//! vertical marker, and a legend when more than one series is drawn.

use std::fmt::Write as _;

use chrono::{Duration, NaiveDate};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;

const AXIS_COLOR: &str = "#333333";
const MARKER_COLOR: &str = "#555555";
const FONT_FAMILY: &str = "sans-serif";

/// One named line on the chart.
pub struct ChartSeries<'a> {
    pub label: &'a str,
    pub color: &'a str,
    pub points: &'a [(NaiveDate, f64)],
}

/// A time-series line chart with an optional dashed vertical marker.
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub series: Vec<ChartSeries<'a>>,
    pub vline: Option<NaiveDate>,
}

struct Bounds {
    x0: NaiveDate,
    x1: NaiveDate,
    y0: f64,
    y1: f64,
}

impl LineChart<'_> {
    pub fn to_svg(&self) -> String {
        let Some(bounds) = self.data_bounds() else {
            return empty_svg(self.title);
        };

        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let bottom = MARGIN_TOP + plot_h;
        let right = MARGIN_LEFT + plot_w;
        let span_days = (bounds.x1 - bounds.x0).num_days().max(1);

        let x_px = |date: NaiveDate| -> f64 {
            MARGIN_LEFT + (date - bounds.x0).num_days() as f64 / span_days as f64 * plot_w
        };
        let y_px =
            |v: f64| -> f64 { MARGIN_TOP + (bounds.y1 - v) / (bounds.y1 - bounds.y0) * plot_h };

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        );
        let _ = writeln!(svg, r##"<rect width="{WIDTH}" height="{HEIGHT}" fill="#ffffff"/>"##);

        // Title
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="30" font-family="{FONT_FAMILY}" font-size="18" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
            WIDTH / 2.0,
            xml_escape(self.title)
        );

        // Axis frame
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#
        );

        // y ticks
        let step = nice_step(bounds.y1 - bounds.y0, 5);
        let mut tick = (bounds.y0 / step).ceil() * step;
        while tick <= bounds.y1 + step * 1e-9 {
            let py = y_px(tick);
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{py:.1}" x2="{MARGIN_LEFT}" y2="{py:.1}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#,
                MARGIN_LEFT - 5.0
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" text-anchor="end" fill="{AXIS_COLOR}">{}</text>"#,
                MARGIN_LEFT - 9.0,
                py + 4.0,
                format_tick(tick, step)
            );
            tick += step;
        }

        // x ticks
        for date in x_ticks(bounds.x0, bounds.x1) {
            let px = x_px(date);
            let _ = writeln!(
                svg,
                r#"<line x1="{px:.1}" y1="{bottom}" x2="{px:.1}" y2="{:.1}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#,
                bottom + 5.0
            );
            let _ = writeln!(
                svg,
                r#"<text x="{px:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
                bottom + 22.0,
                date.format("%Y-%m-%d")
            );
        }

        // Axis labels
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="14" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 16.0,
            xml_escape(self.x_label)
        );
        let y_label_x = 24.0;
        let y_label_y = MARGIN_TOP + plot_h / 2.0;
        let _ = writeln!(
            svg,
            r#"<text x="{y_label_x:.1}" y="{y_label_y:.1}" font-family="{FONT_FAMILY}" font-size="14" text-anchor="middle" transform="rotate(-90 {y_label_x:.1} {y_label_y:.1})" fill="{AXIS_COLOR}">{}</text>"#,
            xml_escape(self.y_label)
        );

        // Dashed vertical marker (only when inside the data range)
        if let Some(marker) = self.vline {
            if marker >= bounds.x0 && marker <= bounds.x1 {
                let px = x_px(marker);
                let _ = writeln!(
                    svg,
                    r#"<line x1="{px:.1}" y1="{MARGIN_TOP}" x2="{px:.1}" y2="{bottom}" stroke="{MARKER_COLOR}" stroke-width="1.2" stroke-dasharray="6,4"/>"#
                );
            }
        }

        // Series polylines
        for series in &self.series {
            if series.points.is_empty() {
                continue;
            }
            let mut points = String::new();
            for (date, value) in series.points {
                let _ = write!(points, "{:.1},{:.1} ", x_px(*date), y_px(*value));
            }
            let _ = writeln!(
                svg,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
                points.trim_end(),
                series.color
            );
        }

        // Legend (only worth drawing with multiple series)
        if self.series.len() > 1 {
            let legend_x = MARGIN_LEFT + 14.0;
            let mut legend_y = MARGIN_TOP + 16.0;
            for series in &self.series {
                let _ = writeln!(
                    svg,
                    r#"<line x1="{legend_x:.1}" y1="{legend_y:.1}" x2="{:.1}" y2="{legend_y:.1}" stroke="{}" stroke-width="1.5"/>"#,
                    legend_x + 26.0,
                    series.color
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" fill="{AXIS_COLOR}">{}</text>"#,
                    legend_x + 34.0,
                    legend_y + 4.0,
                    xml_escape(series.label)
                );
                legend_y += 18.0;
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn data_bounds(&self) -> Option<Bounds> {
        let mut x0: Option<NaiveDate> = None;
        let mut x1: Option<NaiveDate> = None;
        let mut y0 = f64::INFINITY;
        let mut y1 = f64::NEG_INFINITY;

        for series in &self.series {
            for (date, value) in series.points {
                x0 = Some(x0.map_or(*date, |d: NaiveDate| d.min(*date)));
                x1 = Some(x1.map_or(*date, |d: NaiveDate| d.max(*date)));
                y0 = y0.min(*value);
                y1 = y1.max(*value);
            }
        }

        let (x0, x1) = (x0?, x1?);
        // Pad the value range so lines don't sit on the frame.
        let pad = if y1 > y0 { (y1 - y0) * 0.05 } else { 1.0 };
        Some(Bounds {
            x0,
            x1,
            y0: y0 - pad,
            y1: y1 + pad,
        })
    }
}

fn x_ticks(x0: NaiveDate, x1: NaiveDate) -> Vec<NaiveDate> {
    let span = (x1 - x0).num_days().max(1);
    let count = 5;
    let mut ticks: Vec<NaiveDate> = (0..=count)
        .map(|i| x0 + Duration::days(span * i / count))
        .collect();
    ticks.dedup();
    ticks
}

/// Round a raw tick interval to a 1/2/5 × 10^k step.
fn nice_step(range: f64, target: usize) -> f64 {
    let raw = range / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn empty_svg(title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="60"><text x="10" y="35" font-family="{FONT_FAMILY}" font-size="14">{}: no data</text></svg>"#,
        xml_escape(title)
    )
}
