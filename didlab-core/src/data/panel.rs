//! Panel — the loaded observation table plus derived summaries.

use chrono::NaiveDate;

use crate::domain::{ExposureGroup, Observation};

/// The full observation panel, read-only after construction.
#[derive(Debug, Clone)]
pub struct Panel {
    observations: Vec<Observation>,
}

impl Panel {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations belonging to one exposure group.
    pub fn group(&self, group: ExposureGroup) -> impl Iterator<Item = &Observation> {
        self.observations.iter().filter(move |o| o.group == group)
    }

    /// Number of distinct DMAs in a group.
    pub fn unit_count(&self, group: ExposureGroup) -> usize {
        let mut units: Vec<&str> = self.group(group).map(|o| o.dma.as_str()).collect();
        units.sort_unstable();
        units.dedup();
        units.len()
    }

    /// Earliest and latest observation dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.observations.iter().map(|o| o.date).min()?;
        let max = self.observations.iter().map(|o| o.date).max()?;
        Some((min, max))
    }

    /// Deterministic BLAKE3 hash over the panel contents.
    ///
    /// Rows are hashed in (dma, date) order, so the hash is independent of
    /// input row order.
    pub fn dataset_hash(&self) -> String {
        let mut order: Vec<usize> = (0..self.observations.len()).collect();
        order.sort_by(|&a, &b| {
            let (oa, ob) = (&self.observations[a], &self.observations[b]);
            (oa.dma.as_str(), oa.date).cmp(&(ob.dma.as_str(), ob.date))
        });

        let mut hasher = blake3::Hasher::new();
        for idx in order {
            let obs = &self.observations[idx];
            hasher.update(obs.dma.as_bytes());
            hasher.update(obs.date.to_string().as_bytes());
            hasher.update(&obs.revenue.to_le_bytes());
            hasher.update(&[obs.group as u8, obs.period as u8]);
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Period;

    fn obs(dma: &str, day: u32, group: ExposureGroup) -> Observation {
        Observation {
            dma: dma.into(),
            date: NaiveDate::from_ymd_opt(2012, 5, day).unwrap(),
            revenue: 1000.0 + f64::from(day),
            log_revenue: (1000.0 + f64::from(day)).ln(),
            group,
            period: Period::Pre,
        }
    }

    #[test]
    fn counts_distinct_units_per_group() {
        let panel = Panel::new(vec![
            obs("500", 1, ExposureGroup::Treated),
            obs("500", 2, ExposureGroup::Treated),
            obs("501", 1, ExposureGroup::Treated),
            obs("600", 1, ExposureGroup::Control),
        ]);
        assert_eq!(panel.unit_count(ExposureGroup::Treated), 2);
        assert_eq!(panel.unit_count(ExposureGroup::Control), 1);
    }

    #[test]
    fn date_range_spans_panel() {
        let panel = Panel::new(vec![
            obs("500", 3, ExposureGroup::Treated),
            obs("500", 1, ExposureGroup::Treated),
            obs("500", 9, ExposureGroup::Treated),
        ]);
        let (min, max) = panel.date_range().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2012, 5, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2012, 5, 9).unwrap());
    }

    #[test]
    fn empty_panel_has_no_date_range() {
        assert!(Panel::new(Vec::new()).date_range().is_none());
    }

    #[test]
    fn dataset_hash_ignores_row_order() {
        let a = obs("500", 1, ExposureGroup::Treated);
        let b = obs("501", 2, ExposureGroup::Control);
        let forward = Panel::new(vec![a.clone(), b.clone()]);
        let backward = Panel::new(vec![b, a]);
        assert_eq!(forward.dataset_hash(), backward.dataset_hash());
    }

    #[test]
    fn dataset_hash_changes_with_content() {
        let base = Panel::new(vec![obs("500", 1, ExposureGroup::Treated)]);
        let mut changed_obs = obs("500", 1, ExposureGroup::Treated);
        changed_obs.revenue += 1.0;
        let changed = Panel::new(vec![changed_obs]);
        assert_ne!(base.dataset_hash(), changed.dataset_hash());
    }
}
