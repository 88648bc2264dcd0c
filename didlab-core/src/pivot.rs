//! Group pivot — per-unit pre/post mean log revenue.
//!
//! Collapses one exposure group's observations to a single row per DMA with
//! the mean log revenue in each period and their difference. Units observed
//! in only one period have no defined difference; they are excluded from
//! the rows and reported by id, never imputed. Rows come back ordered by
//! unit id, so repeated runs serialize byte-identically.

use std::collections::BTreeMap;

use crate::domain::{Observation, Period, UnitPivotRow};

/// Result of pivoting one exposure group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPivot {
    /// One row per unit observed in both periods, ordered by unit id.
    pub rows: Vec<UnitPivotRow>,
    /// Units observed in only one period, excluded from `rows`.
    pub dropped: Vec<String>,
}

impl GroupPivot {
    /// Per-unit log-revenue differences, in row order.
    pub fn diffs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.log_revenue_diff).collect()
    }
}

/// Pivot one group's observations into per-unit rows.
pub fn pivot_group<'a, I>(observations: I) -> GroupPivot
where
    I: IntoIterator<Item = &'a Observation>,
{
    #[derive(Default)]
    struct Acc {
        pre_sum: f64,
        pre_n: u32,
        post_sum: f64,
        post_n: u32,
    }

    let mut units: BTreeMap<String, Acc> = BTreeMap::new();
    for obs in observations {
        let acc = units.entry(obs.dma.clone()).or_default();
        match obs.period {
            Period::Pre => {
                acc.pre_sum += obs.log_revenue;
                acc.pre_n += 1;
            }
            Period::Post => {
                acc.post_sum += obs.log_revenue;
                acc.post_n += 1;
            }
        }
    }

    let mut rows = Vec::new();
    let mut dropped = Vec::new();
    for (dma, acc) in units {
        if acc.pre_n == 0 || acc.post_n == 0 {
            dropped.push(dma);
            continue;
        }
        let pre = acc.pre_sum / f64::from(acc.pre_n);
        let post = acc.post_sum / f64::from(acc.post_n);
        rows.push(UnitPivotRow::new(dma, pre, post));
    }

    GroupPivot { rows, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExposureGroup;
    use chrono::NaiveDate;

    fn obs(dma: &str, day: u32, log_revenue: f64, period: Period) -> Observation {
        Observation {
            dma: dma.into(),
            date: NaiveDate::from_ymd_opt(2012, 5, day).unwrap(),
            revenue: log_revenue.exp(),
            log_revenue,
            group: ExposureGroup::Treated,
            period,
        }
    }

    #[test]
    fn averages_within_each_period() {
        let observations = vec![
            obs("500", 1, 9.0, Period::Pre),
            obs("500", 2, 9.2, Period::Pre),
            obs("500", 20, 9.5, Period::Post),
        ];
        let pivot = pivot_group(&observations);

        assert_eq!(pivot.rows.len(), 1);
        let row = &pivot.rows[0];
        assert!((row.log_revenue_pre - 9.1).abs() < 1e-12);
        assert!((row.log_revenue_post - 9.5).abs() < 1e-12);
        assert!((row.log_revenue_diff - 0.4).abs() < 1e-12);
    }

    #[test]
    fn diff_equals_post_minus_pre_for_every_row() {
        let observations = vec![
            obs("500", 1, 9.0, Period::Pre),
            obs("500", 20, 9.3, Period::Post),
            obs("501", 1, 10.0, Period::Pre),
            obs("501", 20, 9.8, Period::Post),
        ];
        let pivot = pivot_group(&observations);
        for row in &pivot.rows {
            assert!(
                (row.log_revenue_diff - (row.log_revenue_post - row.log_revenue_pre)).abs()
                    < 1e-12
            );
        }
    }

    #[test]
    fn unit_missing_post_period_is_dropped_and_reported() {
        let observations = vec![
            obs("500", 1, 9.0, Period::Pre),
            obs("500", 20, 9.3, Period::Post),
            obs("999", 1, 8.0, Period::Pre),
        ];
        let pivot = pivot_group(&observations);

        assert_eq!(pivot.rows.len(), 1);
        assert_eq!(pivot.rows[0].dma, "500");
        assert_eq!(pivot.dropped, vec!["999".to_string()]);
    }

    #[test]
    fn unit_missing_pre_period_is_dropped_and_reported() {
        let observations = vec![obs("998", 20, 8.0, Period::Post)];
        let pivot = pivot_group(&observations);
        assert!(pivot.rows.is_empty());
        assert_eq!(pivot.dropped, vec!["998".to_string()]);
    }

    #[test]
    fn rows_are_ordered_by_unit_id() {
        let observations = vec![
            obs("502", 1, 9.0, Period::Pre),
            obs("502", 20, 9.1, Period::Post),
            obs("500", 1, 9.0, Period::Pre),
            obs("500", 20, 9.1, Period::Post),
            obs("501", 1, 9.0, Period::Pre),
            obs("501", 20, 9.1, Period::Post),
        ];
        let pivot = pivot_group(&observations);
        let ids: Vec<&str> = pivot.rows.iter().map(|r| r.dma.as_str()).collect();
        assert_eq!(ids, vec!["500", "501", "502"]);
    }

    #[test]
    fn empty_group_pivots_to_nothing() {
        let pivot = pivot_group(&[]);
        assert!(pivot.rows.is_empty());
        assert!(pivot.dropped.is_empty());
    }
}
