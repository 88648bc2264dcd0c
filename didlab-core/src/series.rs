//! Daily descriptive series behind the figures.
//!
//! Presentational aggregates only; nothing downstream of the estimator
//! consumes them.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data::Panel;
use crate::domain::ExposureGroup;

/// One point of a daily series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Mean raw revenue per day for one exposure group.
pub fn daily_mean_revenue(panel: &Panel, group: ExposureGroup) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for obs in panel.group(group) {
        let entry = days.entry(obs.date).or_insert((0.0, 0));
        entry.0 += obs.revenue;
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (sum, n))| DailyPoint {
            date,
            value: sum / f64::from(n),
        })
        .collect()
}

/// Daily mean log-revenue gap: control minus treated.
///
/// Days where either group has no observations are skipped.
pub fn daily_log_revenue_gap(panel: &Panel) -> Vec<DailyPoint> {
    let control = daily_mean_log_revenue(panel, ExposureGroup::Control);
    let treated = daily_mean_log_revenue(panel, ExposureGroup::Treated);
    control
        .iter()
        .filter_map(|(date, c)| {
            treated.get(date).map(|t| DailyPoint {
                date: *date,
                value: c - t,
            })
        })
        .collect()
}

fn daily_mean_log_revenue(panel: &Panel, group: ExposureGroup) -> BTreeMap<NaiveDate, f64> {
    let mut days: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for obs in panel.group(group) {
        let entry = days.entry(obs.date).or_insert((0.0, 0));
        entry.0 += obs.log_revenue;
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (sum, n))| (date, sum / f64::from(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Observation, Period};
    use chrono::Datelike;

    fn obs(dma: &str, day: u32, revenue: f64, group: ExposureGroup) -> Observation {
        Observation {
            dma: dma.into(),
            date: NaiveDate::from_ymd_opt(2012, 5, day).unwrap(),
            revenue,
            log_revenue: revenue.ln(),
            group,
            period: Period::Pre,
        }
    }

    #[test]
    fn daily_mean_revenue_averages_units() {
        let panel = Panel::new(vec![
            obs("500", 1, 100.0, ExposureGroup::Treated),
            obs("501", 1, 300.0, ExposureGroup::Treated),
            obs("500", 2, 150.0, ExposureGroup::Treated),
            obs("600", 1, 999.0, ExposureGroup::Control),
        ]);
        let series = daily_mean_revenue(&panel, ExposureGroup::Treated);

        assert_eq!(series.len(), 2);
        assert!((series[0].value - 200.0).abs() < 1e-12);
        assert!((series[1].value - 150.0).abs() < 1e-12);
    }

    #[test]
    fn series_dates_are_ascending() {
        let panel = Panel::new(vec![
            obs("500", 9, 100.0, ExposureGroup::Treated),
            obs("500", 1, 100.0, ExposureGroup::Treated),
            obs("500", 5, 100.0, ExposureGroup::Treated),
        ]);
        let series = daily_mean_revenue(&panel, ExposureGroup::Treated);
        let dates: Vec<u32> = series.iter().map(|p| p.date.day()).collect();
        assert_eq!(dates, vec![1, 5, 9]);
    }

    #[test]
    fn gap_is_control_minus_treated() {
        let panel = Panel::new(vec![
            obs("500", 1, 100.0, ExposureGroup::Treated),
            obs("600", 1, 200.0, ExposureGroup::Control),
        ]);
        let gap = daily_log_revenue_gap(&panel);

        assert_eq!(gap.len(), 1);
        let expected = 200.0_f64.ln() - 100.0_f64.ln();
        assert!((gap[0].value - expected).abs() < 1e-12);
    }

    #[test]
    fn gap_skips_days_missing_a_group() {
        let panel = Panel::new(vec![
            obs("500", 1, 100.0, ExposureGroup::Treated),
            obs("600", 1, 200.0, ExposureGroup::Control),
            obs("600", 2, 210.0, ExposureGroup::Control),
        ]);
        let gap = daily_log_revenue_gap(&panel);
        assert_eq!(gap.len(), 1);
        assert_eq!(gap[0].date, NaiveDate::from_ymd_opt(2012, 5, 1).unwrap());
    }
}
