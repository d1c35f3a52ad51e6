//! Price ↔ return transforms.

use crate::{Estimate, PriceSeries, ReturnSeries, TimeSeries};

/// Percentage change between consecutive observations.
///
/// The first observation has no predecessor and is dropped, so the result is
/// one element shorter than the input. Changes from a zero price are not
/// finite and are dropped as gaps.
pub fn returns(prices: &PriceSeries) -> ReturnSeries {
    let values = prices.values();
    let mut dates = Vec::with_capacity(values.len().saturating_sub(1));
    let mut changes = Vec::with_capacity(values.len().saturating_sub(1));

    for (index, window) in values.windows(2).enumerate() {
        let change = window[1] / window[0] - 1.0;
        if change.is_finite() {
            dates.push(prices.dates()[index + 1]);
            changes.push(change);
        }
    }

    TimeSeries::from_sorted(dates, changes)
}

/// Rebuild a price path from a starting price and returns:
/// `p₀ × ∏(1 + rᵢ)`. The starting date is not part of `returns`, so the
/// output holds one point per return.
pub fn cumulative_index(start_price: f64, returns: &ReturnSeries) -> PriceSeries {
    let mut level = start_price;
    let values = returns
        .values()
        .iter()
        .map(|change| {
            level *= 1.0 + change;
            level
        })
        .collect();
    TimeSeries::from_sorted(returns.dates().to_vec(), values)
}

/// Rescale prices so the first observation equals 100.
pub fn normalized_index(prices: &PriceSeries) -> TimeSeries<Estimate> {
    let base = prices
        .first()
        .map_or(Estimate::Undefined, |(_, first)| Estimate::new(*first));
    let values = prices
        .values()
        .iter()
        .map(|price| Estimate::new(*price) / base * 100.0)
        .collect();
    TimeSeries::from_sorted(prices.dates().to_vec(), values)
}

/// Total-period return `last / first - 1`; undefined for empty input.
pub fn total_return(prices: &PriceSeries) -> Estimate {
    match (prices.first(), prices.last()) {
        (Some((_, first)), Some((_, last))) => Estimate::new(*last) / *first - 1.0,
        _ => Estimate::Undefined,
    }
}
