//! Descriptive statistics and least-squares primitives shared by the
//! estimators. All functions work on plain slices; alignment by date happens
//! before these are called.

use serde::Serialize;

use crate::Estimate;

/// Delta degrees of freedom for variance estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ddof {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1`.
    Sample,
}

impl Ddof {
    fn offset(self) -> usize {
        match self {
            Self::Population => 0,
            Self::Sample => 1,
        }
    }
}

pub fn mean(values: &[f64]) -> Estimate {
    if values.is_empty() {
        return Estimate::Undefined;
    }
    Estimate::new(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn variance(values: &[f64], ddof: Ddof) -> Estimate {
    let n = values.len();
    if n <= ddof.offset() {
        return Estimate::Undefined;
    }
    let Some(mean) = mean(values).value() else {
        return Estimate::Undefined;
    };
    let ss = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
    Estimate::new(ss / (n - ddof.offset()) as f64)
}

pub fn std_dev(values: &[f64], ddof: Ddof) -> Estimate {
    variance(values, ddof).sqrt()
}

/// Trailing mean over `window` observations, aligned with the input. The
/// first `window - 1` positions are undefined.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Estimate> {
    rolling(values, window, mean)
}

/// Trailing standard deviation over `window` observations, aligned with the
/// input.
pub fn rolling_std(values: &[f64], window: usize, ddof: Ddof) -> Vec<Estimate> {
    rolling(values, window, |slice| std_dev(slice, ddof))
}

fn rolling(values: &[f64], window: usize, stat: impl Fn(&[f64]) -> Estimate) -> Vec<Estimate> {
    (0..values.len())
        .map(|end| {
            if window == 0 || end + 1 < window {
                Estimate::Undefined
            } else {
                stat(&values[end + 1 - window..=end])
            }
        })
        .collect()
}

/// Pearson correlation coefficient; undefined for zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Estimate {
    if x.len() != y.len() || x.len() < 2 {
        return Estimate::Undefined;
    }
    let (Some(mean_x), Some(mean_y)) = (mean(x).value(), mean(y).value()) else {
        return Estimate::Undefined;
    };

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    Estimate::new(sxy) / (Estimate::new(sxx) * syy).sqrt()
}

/// Median; an even count averages the two middle values.
pub fn median(values: &mut [f64]) -> Estimate {
    let n = values.len();
    if n == 0 {
        return Estimate::Undefined;
    }
    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        return Estimate::new(upper);
    }
    let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Estimate::new((lower_max + upper) / 2.0)
}

/// Coefficients of `y = alpha + beta * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub alpha: f64,
    pub beta: f64,
    /// Undefined when `y` has no variance.
    pub r_squared: Estimate,
}

/// Ordinary least squares with intercept.
///
/// `None` when fewer than two observations or `x` is constant.
pub fn fit_ols(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    let weights = vec![1.0; x.len()];
    fit_wls(x, y, &weights)
}

/// Weighted least squares with intercept, minimising `Σ wᵢ (yᵢ - α - β xᵢ)²`.
pub fn fit_wls(x: &[f64], y: &[f64], weights: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() != weights.len() || x.len() < 2 {
        return None;
    }

    let sum_w = weights.iter().sum::<f64>();
    if !(sum_w.is_finite() && sum_w > 0.0) {
        return None;
    }
    let mean_x = weighted_sum(weights, x) / sum_w;
    let mean_y = weighted_sum(weights, y) / sum_w;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for ((xi, yi), wi) in x.iter().zip(y).zip(weights) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += wi * dx * dx;
        sxy += wi * dx * dy;
        syy += wi * dy * dy;
    }

    if !(sxx.is_finite() && sxx > 0.0) {
        return None;
    }

    let beta = sxy / sxx;
    let alpha = mean_y - beta * mean_x;
    if !(beta.is_finite() && alpha.is_finite()) {
        return None;
    }

    let ss_res = x
        .iter()
        .zip(y)
        .zip(weights)
        .map(|((xi, yi), wi)| wi * (yi - alpha - beta * xi).powi(2))
        .sum::<f64>();
    let r_squared = if syy == 0.0 {
        Estimate::Undefined
    } else {
        Estimate::new(1.0 - ss_res / syy)
    };

    Some(LinearFit {
        alpha,
        beta,
        r_squared,
    })
}

fn weighted_sum(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}
