//! # Hedge-ratio estimators
//!
//! Three independent slope estimators of alt returns (`y`) on base returns
//! (`x`). Each one intersects the two series by date first and returns
//! [`Estimate::Undefined`] when fewer than [`MIN_REGRESSION_OBSERVATIONS`]
//! aligned observations exist or `x` has no variance.
//!
//! | Estimator | Objective |
//! |-----------|-----------|
//! | [`beta_ols`] | least squares with intercept |
//! | [`beta_wls`] | least squares weighted by inverse local variance of `y` |
//! | [`beta_robust`] | Theil–Sen median of pairwise slopes |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats::{self, Ddof, LinearFit};
use crate::{AlignedPair, Estimate, ReturnSeries, ValidationError};

/// Fewer aligned observations than this make every regression output undefined.
pub const MIN_REGRESSION_OBSERVATIONS: usize = 5;

/// Trailing window of the local volatility used for WLS weights.
pub const WLS_VOLATILITY_WINDOW: usize = 20;

/// Beta, intercept and goodness of fit of alt-on-base returns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RegressionSummary {
    pub beta: Estimate,
    pub alpha: Estimate,
    pub r_squared: Estimate,
}

impl From<LinearFit> for RegressionSummary {
    fn from(fit: LinearFit) -> Self {
        Self {
            beta: Estimate::new(fit.beta),
            alpha: Estimate::new(fit.alpha),
            r_squared: fit.r_squared,
        }
    }
}

/// OLS regression of `y` on `x` with intercept over aligned observations.
pub fn regress(x_returns: &ReturnSeries, y_returns: &ReturnSeries) -> RegressionSummary {
    regress_aligned(&AlignedPair::intersect(x_returns, y_returns))
}

pub(crate) fn regress_aligned(aligned: &AlignedPair) -> RegressionSummary {
    if aligned.len() < MIN_REGRESSION_OBSERVATIONS {
        debug!(
            observations = aligned.len(),
            "too few aligned observations for regression"
        );
        return RegressionSummary::default();
    }
    stats::fit_ols(aligned.x(), aligned.y())
        .map(RegressionSummary::from)
        .unwrap_or_default()
}

/// Ordinary least squares slope of `y = α + β·x`.
pub fn beta_ols(x_returns: &ReturnSeries, y_returns: &ReturnSeries) -> Estimate {
    regress(x_returns, y_returns).beta
}

/// Weighted least squares slope, weighting each observation by the inverse
/// of the squared 20-observation trailing sample standard deviation of `y`.
///
/// Where the local variance is undefined (the first 19 observations) or zero
/// (constant-return runs), the overall sample variance of `y` is used
/// instead. If that is also zero or undefined every weight is one.
pub fn beta_wls(x_returns: &ReturnSeries, y_returns: &ReturnSeries) -> Estimate {
    let aligned = AlignedPair::intersect(x_returns, y_returns);
    if aligned.len() < MIN_REGRESSION_OBSERVATIONS {
        return Estimate::Undefined;
    }

    let weights = wls_weights(aligned.y());
    stats::fit_wls(aligned.x(), aligned.y(), &weights)
        .map_or(Estimate::Undefined, |fit| Estimate::new(fit.beta))
}

fn wls_weights(y: &[f64]) -> Vec<f64> {
    let overall = stats::variance(y, Ddof::Sample).non_zero();
    stats::rolling_std(y, WLS_VOLATILITY_WINDOW, Ddof::Sample)
        .into_iter()
        .map(|local_std| {
            let local = (local_std * local_std).non_zero();
            let variance = if local.is_defined() { local } else { overall };
            (1.0 / variance).unwrap_or(1.0)
        })
        .collect()
}

/// Theil–Sen slope: the median of `(yⱼ - yᵢ) / (xⱼ - xᵢ)` over every pair of
/// observations with distinct `x`. Robust to outliers; does not minimise
/// squared error.
///
/// Materializes all `n(n-1)/2` slopes, so time and memory grow
/// quadratically: 5000 observations hold about 12.5M slopes (~100 MB).
pub fn beta_robust(x_returns: &ReturnSeries, y_returns: &ReturnSeries) -> Estimate {
    let aligned = AlignedPair::intersect(x_returns, y_returns);
    if aligned.len() < MIN_REGRESSION_OBSERVATIONS {
        return Estimate::Undefined;
    }

    let (x, y) = (aligned.x(), aligned.y());
    let n = x.len();
    let mut slopes = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[j] - x[i];
            if dx != 0.0 {
                let slope = (y[j] - y[i]) / dx;
                if slope.is_finite() {
                    slopes.push(slope);
                }
            }
        }
    }

    stats::median(&mut slopes)
}

/// Which estimator produces the hedge ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeMethod {
    Ols,
    Robust,
    Wls,
    #[serde(rename = "coint")]
    Cointegration,
}

impl HedgeMethod {
    pub const ALL: [HedgeMethod; 4] = [Self::Ols, Self::Robust, Self::Wls, Self::Cointegration];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ols => "ols",
            Self::Robust => "robust",
            Self::Wls => "wls",
            Self::Cointegration => "coint",
        }
    }
}

impl Display for HedgeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HedgeMethod {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = match value.trim().to_ascii_lowercase().as_str() {
            "cointegration" => String::from("coint"),
            other => other.to_owned(),
        };
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidHedgeMethod {
                value: value.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeSeries;

    fn series(values: &[f64]) -> ReturnSeries {
        let dates = (1..=values.len())
            .map(|day| format!("2024-01-{day:02}"))
            .collect::<Vec<_>>();
        TimeSeries::from_pairs(
            dates
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied()),
        )
        .expect("series")
    }

    fn base_returns() -> Vec<f64> {
        vec![0.01, -0.02, 0.015, 0.003, -0.007, 0.012, -0.004, 0.009]
    }

    #[test]
    fn all_estimators_agree_on_exact_linear_relation() {
        let x = series(&base_returns());
        let y = series(&base_returns().iter().map(|r| 2.0 * r).collect::<Vec<_>>());

        for beta in [beta_ols(&x, &y), beta_wls(&x, &y), beta_robust(&x, &y)] {
            assert!((beta.unwrap_or(0.0) - 2.0).abs() < 1e-9, "beta was {beta}");
        }
    }

    #[test]
    fn fewer_than_five_observations_is_undefined() {
        let x = series(&[0.01, 0.02, 0.03, 0.04]);
        let y = series(&[0.02, 0.04, 0.06, 0.08]);
        assert!(beta_ols(&x, &y).is_undefined());
        assert!(beta_wls(&x, &y).is_undefined());
        assert!(beta_robust(&x, &y).is_undefined());
    }

    #[test]
    fn constant_base_is_undefined() {
        let x = series(&[0.01; 6]);
        let y = series(&[0.01, 0.02, 0.03, 0.04, 0.05, 0.06]);
        assert!(beta_ols(&x, &y).is_undefined());
        assert!(beta_robust(&x, &y).is_undefined());
    }

    #[test]
    fn robust_ignores_single_outlier() {
        let mut y = base_returns().iter().map(|r| 2.0 * r).collect::<Vec<_>>();
        y[3] = 0.5;
        let x = series(&base_returns());
        let y = series(&y);

        let robust = beta_robust(&x, &y).unwrap_or(0.0);
        let ols = beta_ols(&x, &y).unwrap_or(0.0);
        assert!((robust - 2.0).abs() < 0.5);
        assert!((ols - 2.0).abs() > (robust - 2.0).abs());
    }

    #[test]
    fn wls_weights_fall_back_to_overall_variance() {
        let y = (0..25).map(|i| 0.001 * f64::from(i % 5)).collect::<Vec<_>>();
        let weights = wls_weights(&y);
        let overall = stats::variance(&y, Ddof::Sample).unwrap_or(0.0);
        assert!((weights[0] - 1.0 / overall).abs() < 1e-6);
        assert!((weights[18] - 1.0 / overall).abs() < 1e-6);

        let flat = wls_weights(&[0.0; 25]);
        assert!(flat.iter().all(|weight| *weight == 1.0));
    }

    #[test]
    fn parses_hedge_methods() {
        assert_eq!("OLS".parse::<HedgeMethod>(), Ok(HedgeMethod::Ols));
        assert_eq!("coint".parse::<HedgeMethod>(), Ok(HedgeMethod::Cointegration));
        assert_eq!(
            "cointegration".parse::<HedgeMethod>(),
            Ok(HedgeMethod::Cointegration)
        );
        assert!(matches!(
            "kalman".parse::<HedgeMethod>(),
            Err(ValidationError::InvalidHedgeMethod { .. })
        ));
    }
}
