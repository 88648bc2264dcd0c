//! Unit pivot row — one DMA's pre/post log-revenue means.

use serde::{Deserialize, Serialize};

/// Aggregated log revenue for one DMA within its exposure group.
///
/// Exists only for units observed in both periods; the pivot drops (and
/// reports) anything else, so `log_revenue_diff` is always defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPivotRow {
    pub dma: String,
    pub log_revenue_pre: f64,
    pub log_revenue_post: f64,
    pub log_revenue_diff: f64,
}

impl UnitPivotRow {
    pub fn new(dma: String, log_revenue_pre: f64, log_revenue_post: f64) -> Self {
        Self {
            dma,
            log_revenue_pre,
            log_revenue_post,
            log_revenue_diff: log_revenue_post - log_revenue_pre,
        }
    }
}
