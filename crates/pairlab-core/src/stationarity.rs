//! Augmented Dickey–Fuller unit-root test with a constant term.
//!
//! H0: the series has a unit root (not mean-reverting). A strongly negative
//! statistic and a low p-value reject H0.
//!
//! The regression is
//!
//! ```text
//! Δeₜ = c + γ·eₜ₋₁ + Σᵢ₌₁ᵖ φᵢ·Δeₜ₋ᵢ + εₜ
//! ```
//!
//! with `p` chosen in `0..=max_lag` by minimum AIC on a common sample, then
//! refitted on the full sample the chosen lag allows. The statistic is the
//! t-value of `γ`; the p-value uses the MacKinnon (1994) response surface and
//! critical values the MacKinnon (2010) tables.

use std::f64::consts::{PI, SQRT_2};

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use statrs::function::erf::erfc;
use tracing::debug;

use crate::Estimate;

/// Lag order ceiling for the spread test.
pub const ADF_MAX_LAG: usize = 1;

// MacKinnon (1994) surface for the constant-only case with one variable.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

// MacKinnon (2010) critical value polynomials in 1/T: 1%, 5%, 10%.
const CRIT_1PCT: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5PCT: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.04];
const CRIT_10PCT: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Finite-sample critical values of the test statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    #[serde(rename = "1%")]
    pub one_percent: f64,
    #[serde(rename = "5%")]
    pub five_percent: f64,
    #[serde(rename = "10%")]
    pub ten_percent: f64,
}

impl CriticalValues {
    pub fn for_sample(nobs: usize) -> Self {
        let inv = 1.0 / nobs as f64;
        Self {
            one_percent: polyval(&CRIT_1PCT, inv),
            five_percent: polyval(&CRIT_5PCT, inv),
            ten_percent: polyval(&CRIT_10PCT, inv),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdfResult {
    pub statistic: Estimate,
    pub p_value: Estimate,
    /// Number of lagged differences in the final regression.
    pub used_lag: usize,
    /// Rows in the final regression.
    pub nobs: usize,
    pub critical_values: CriticalValues,
}

/// Run the test; `None` when the series is too short for `max_lag`
/// (`max_lag > len / 2 - 2`) or the regression is singular.
pub fn adf_test(series: &[f64], max_lag: usize) -> Option<AdfResult> {
    let nobs = series.len();
    // one deterministic regressor (the constant)
    if nobs / 2 < max_lag + 2 {
        debug!(nobs, max_lag, "series too short for ADF regression");
        return None;
    }

    let diffs = series.windows(2).map(|w| w[1] - w[0]).collect::<Vec<_>>();

    let mut best: Option<(usize, f64)> = None;
    for lag in 0..=max_lag {
        let fit = fit_adf_regression(series, &diffs, lag, max_lag)?;
        if best.map_or(true, |(_, aic)| fit.aic < aic) {
            best = Some((lag, fit.aic));
        }
    }
    let (used_lag, _) = best?;

    let fit = fit_adf_regression(series, &diffs, used_lag, used_lag)?;
    let statistic = Estimate::new(fit.level_t_value);

    Some(AdfResult {
        statistic,
        p_value: statistic.map(mackinnon_p_value),
        used_lag,
        nobs: fit.nobs,
        critical_values: CriticalValues::for_sample(fit.nobs),
    })
}

struct AdfFit {
    level_t_value: f64,
    aic: f64,
    nobs: usize,
}

/// Regress `Δeₜ` on `[eₜ₋₁, Δeₜ₋₁..Δeₜ₋lag, 1]` using rows from `sample_start`
/// onwards, so fits with different lags can share a sample.
fn fit_adf_regression(
    levels: &[f64],
    diffs: &[f64],
    lag: usize,
    sample_start: usize,
) -> Option<AdfFit> {
    let rows = diffs.len().checked_sub(sample_start)?;
    let cols = lag + 2;
    if rows <= cols {
        return None;
    }

    let mut design = Vec::with_capacity(rows * cols);
    let mut response = Vec::with_capacity(rows);
    for t in sample_start..diffs.len() {
        design.push(levels[t]);
        for i in 1..=lag {
            design.push(diffs[t - i]);
        }
        design.push(1.0);
        response.push(diffs[t]);
    }

    let x = DMatrix::from_row_slice(rows, cols, &design);
    let y = DVector::from_vec(response);
    let xtx_inv = (x.transpose() * &x).try_inverse()?;
    let coefficients = &xtx_inv * (x.transpose() * &y);
    let residuals = &y - &x * &coefficients;
    let ssr = residuals.norm_squared();

    let n = rows as f64;
    let sigma2 = ssr / (rows - cols) as f64;
    let level_se = (sigma2 * xtx_inv[(0, 0)]).sqrt();
    let llf = -n / 2.0 * ((2.0 * PI).ln() + (ssr / n).ln() + 1.0);

    Some(AdfFit {
        level_t_value: coefficients[0] / level_se,
        aic: -2.0 * llf + 2.0 * cols as f64,
        nobs: rows,
    })
}

/// Approximate p-value of a constant-only ADF statistic (one variable).
pub fn mackinnon_p_value(statistic: f64) -> f64 {
    if statistic > TAU_MAX {
        return 1.0;
    }
    if statistic < TAU_MIN {
        return 0.0;
    }
    let z = if statistic <= TAU_STAR {
        polyval(&TAU_SMALL_P, statistic)
    } else {
        polyval(&TAU_LARGE_P, statistic)
    };
    standard_normal_cdf(z)
}

fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// `c₀ + c₁x + c₂x² + …`
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
