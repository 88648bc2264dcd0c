//! Difference-in-differences estimator.
//!
//! Pure closed-form statistics over the per-unit log-revenue differences:
//! group means, Bessel-corrected sample variances, a Welch-style unequal-
//! variance standard error, and a symmetric 95% confidence interval. The
//! interval uses the normal 1.96 quantile rather than a t quantile; at the
//! group sizes this panel carries the approximation is adequate and it
//! matches the reference results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use didlab_core::domain::{ExposureGroup, UnitPivotRow};

/// Normal 97.5% quantile backing the symmetric 95% interval.
const Z_95: f64 = 1.96;

/// Errors from the estimation stage.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("{} group has no units; the group mean is undefined", group.label())]
    EmptyGroup { group: ExposureGroup },

    #[error(
        "{} group has {n} unit(s); sample variance needs at least 2",
        group.label()
    )]
    InsufficientUnits { group: ExposureGroup, n: usize },
}

/// The DID estimate and its sampling intermediates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DidEstimate {
    /// Point estimate of the treatment effect on log revenue.
    pub gamma_hat: f64,
    pub std_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    /// Mean per-unit difference, treated group.
    pub r1_bar: f64,
    /// Mean per-unit difference, control group.
    pub r0_bar: f64,
    pub var1: f64,
    pub var0: f64,
    pub n1: usize,
    pub n0: usize,
}

impl DidEstimate {
    /// Render the fixed-format results block printed to stdout.
    pub fn results_block(&self) -> String {
        format!(
            "DID Results (Log Scale)\n\
             =======================\n\
             Gamma hat: {:.4}\n\
             Std Error: {:.4}\n\
             95% CI: [{:.4}, {:.4}]\n",
            self.gamma_hat, self.std_error, self.ci_lower, self.ci_upper
        )
    }
}

/// Estimate the treatment effect from the two pivot tables.
pub fn estimate(
    treated: &[UnitPivotRow],
    control: &[UnitPivotRow],
) -> Result<DidEstimate, EstimateError> {
    let treated_diffs: Vec<f64> = treated.iter().map(|r| r.log_revenue_diff).collect();
    let control_diffs: Vec<f64> = control.iter().map(|r| r.log_revenue_diff).collect();
    estimate_from_diffs(&treated_diffs, &control_diffs)
}

/// Estimate from raw per-unit differences.
pub fn estimate_from_diffs(
    treated: &[f64],
    control: &[f64],
) -> Result<DidEstimate, EstimateError> {
    let r1_bar = group_mean(treated, ExposureGroup::Treated)?;
    let r0_bar = group_mean(control, ExposureGroup::Control)?;
    let var1 = sample_variance(treated, ExposureGroup::Treated)?;
    let var0 = sample_variance(control, ExposureGroup::Control)?;
    let n1 = treated.len();
    let n0 = control.len();

    let gamma_hat = r1_bar - r0_bar;
    let std_error = (var1 / n1 as f64 + var0 / n0 as f64).sqrt();

    Ok(DidEstimate {
        gamma_hat,
        std_error,
        ci_lower: gamma_hat - Z_95 * std_error,
        ci_upper: gamma_hat + Z_95 * std_error,
        r1_bar,
        r0_bar,
        var1,
        var0,
        n1,
        n0,
    })
}

fn group_mean(values: &[f64], group: ExposureGroup) -> Result<f64, EstimateError> {
    if values.is_empty() {
        return Err(EstimateError::EmptyGroup { group });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected sample variance (n − 1 denominator).
fn sample_variance(values: &[f64], group: ExposureGroup) -> Result<f64, EstimateError> {
    let n = values.len();
    if n < 2 {
        return Err(EstimateError::InsufficientUnits { group, n });
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    Ok(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64)
}
