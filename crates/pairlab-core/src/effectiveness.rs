//! Variance-reduction measures of a hedge.

use crate::metrics::annualized_volatility;
use crate::stats::{self, Ddof};
use crate::{AlignedPair, Estimate, PriceSeries, ReturnSeries, TimeSeries};

/// `1 − var(hedged) / var(unhedged)` with sample variances.
///
/// Each series is used as given; aligning them is the caller's concern.
/// Undefined when either variance is undefined (fewer than two points) or
/// the unhedged variance is zero. At most 1; negative when the hedge added
/// variance.
pub fn hedge_effectiveness(unhedged: &ReturnSeries, hedged: &ReturnSeries) -> Estimate {
    let unhedged_var = stats::variance(unhedged.values(), Ddof::Sample).non_zero();
    let hedged_var = stats::variance(hedged.values(), Ddof::Sample);
    1.0 - hedged_var / unhedged_var
}

/// Returns of the static portfolio `qty_alt·alt + qty_base·base` over the
/// common dates of the two price series.
///
/// A zero portfolio value makes the following return a gap.
pub fn hedged_portfolio_returns(
    qty_alt: f64,
    qty_base: f64,
    alt_prices: &PriceSeries,
    base_prices: &PriceSeries,
) -> ReturnSeries {
    let aligned = AlignedPair::intersect(alt_prices, base_prices);
    let values = aligned
        .x()
        .iter()
        .zip(aligned.y())
        .map(|(alt, base)| qty_alt * alt + qty_base * base)
        .collect();
    let portfolio = TimeSeries::from_sorted(aligned.dates().to_vec(), values);
    crate::returns::returns(&portfolio)
}

/// Annualized volatility of a position's returns (sample standard deviation).
pub fn position_volatility(returns: &ReturnSeries) -> Estimate {
    annualized_volatility(returns, Ddof::Sample)
}
