//! LaTeX results table.

use crate::estimator::DidEstimate;

/// Render the single-row DID results table.
///
/// The template is fixed; only the four numbers vary, each rounded to four
/// decimal places.
pub fn did_table(estimate: &DidEstimate) -> String {
    format!(
        r"\begin{{table}}[h]
\centering
\caption{{Difference-in-Differences Estimate of the Effect of Paid Search on Revenue}}
\begin{{tabular}}{{lc}}
\hline
& Log Scale \\
\hline
Point Estimate ($\hat{{\gamma}}$) & ${gamma:.4}$ \\
Standard Error & ${se:.4}$ \\
95\% CI & $[{lower:.4}, \; {upper:.4}]$ \\
\hline
\end{{tabular}}
\label{{tab:did}}
\end{{table}}",
        gamma = estimate.gamma_hat,
        se = estimate.std_error,
        lower = estimate.ci_lower,
        upper = estimate.ci_upper,
    )
}
