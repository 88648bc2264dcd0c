//! Observation — the fundamental panel data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue observation for a single DMA on a single day.
///
/// `log_revenue` is derived from the raw revenue column at load time and is
/// what every downstream aggregate consumes; `revenue` is retained for the
/// descriptive figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub dma: String,
    pub date: NaiveDate,
    pub revenue: f64,
    pub log_revenue: f64,
    pub group: ExposureGroup,
    pub period: Period,
}

impl Observation {
    /// Basic sanity check: positive finite revenue with a finite log.
    pub fn is_sane(&self) -> bool {
        self.revenue > 0.0 && self.revenue.is_finite() && self.log_revenue.is_finite()
    }
}

/// Which side of the experiment a DMA is on.
///
/// Treatment is the *removal* of the paid-search channel: DMAs whose
/// campaigns went dark at the cutover are `Treated`, DMAs whose campaigns
/// stayed on are `Control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureGroup {
    Treated,
    Control,
}

impl ExposureGroup {
    /// Decode the panel's `search_stays_on` flag (0 = goes off = treated).
    pub fn from_stays_on(stays_on: bool) -> Self {
        if stays_on {
            Self::Control
        } else {
            Self::Treated
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Treated => "treated",
            Self::Control => "control",
        }
    }
}

/// Pre/post position of an observation relative to the intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Pre,
    Post,
}

impl Period {
    /// Decode the panel's `treatment_period` flag (1 = post).
    pub fn from_flag(post: bool) -> Self {
        if post {
            Self::Post
        } else {
            Self::Pre
        }
    }
}
