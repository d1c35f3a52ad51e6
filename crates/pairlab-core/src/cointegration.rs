//! Engle–Granger style spread diagnosis on log prices.

use serde::Serialize;
use tracing::debug;

use crate::regression::{regress_aligned, MIN_REGRESSION_OBSERVATIONS};
use crate::stationarity::{adf_test, CriticalValues, ADF_MAX_LAG};
use crate::{AlignedPair, Estimate, PriceSeries, TimeSeries};

/// Hedge ratio from the log-price regression and the ADF test of its residual.
///
/// A p-value below 0.05 conventionally suggests the spread mean-reverts; the
/// engine reports the numbers and leaves that judgement to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CointegrationResult {
    pub beta: Estimate,
    pub alpha: Estimate,
    pub adf_stat: Estimate,
    pub p_value: Estimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_lag: Option<usize>,
    /// Aligned log-price observations in the spread regression.
    pub n_obs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_values: Option<CriticalValues>,
}

/// Regress `ln y = α + β·ln x` on the date intersection and test the residual
/// for a unit root (lag ≤ 1 chosen by AIC, constant term).
pub fn cointegration(x_prices: &PriceSeries, y_prices: &PriceSeries) -> CointegrationResult {
    let aligned = AlignedPair::intersect(&log_prices(x_prices), &log_prices(y_prices));
    let mut result = CointegrationResult {
        n_obs: aligned.len(),
        ..CointegrationResult::default()
    };
    if aligned.len() < MIN_REGRESSION_OBSERVATIONS {
        return result;
    }

    let fit = regress_aligned(&aligned);
    result.beta = fit.beta;
    result.alpha = fit.alpha;
    let (Some(alpha), Some(beta)) = (fit.alpha.value(), fit.beta.value()) else {
        return result;
    };

    let residuals = aligned
        .x()
        .iter()
        .zip(aligned.y())
        .map(|(lx, ly)| ly - (alpha + beta * lx))
        .collect::<Vec<_>>();

    match adf_test(&residuals, ADF_MAX_LAG) {
        Some(adf) => {
            result.adf_stat = adf.statistic;
            result.p_value = adf.p_value;
            result.used_lag = Some(adf.used_lag);
            result.critical_values = Some(adf.critical_values);
        }
        None => debug!(
            observations = residuals.len(),
            "spread residual unsuitable for ADF test"
        ),
    }

    result
}

/// Natural log of each price; non-positive prices become gaps.
fn log_prices(prices: &PriceSeries) -> TimeSeries<f64> {
    let (dates, values) = prices
        .iter()
        .map(|(date, price)| (date, price.ln()))
        .filter(|(_, value)| value.is_finite())
        .unzip();
    TimeSeries::from_sorted(dates, values)
}
