// Shared fixtures for the behavior tests
pub use pairlab_core::{
    analyze_hedge, beta_ols, beta_robust, beta_wls, cointegration, cumulative_index,
    estimate_hedge_ratio, hedge_effectiveness, hedge_shares, hedged_portfolio_returns,
    normalized_index, position_volatility, regress, returns, rolling_beta, simulate_hedge_pnl,
    spread_bands, summarize, summarize_pair, summarize_universe, total_return, DateRange,
    Estimate, HedgeMethod, HedgeRequest, InstrumentHistory, MarketData, PairSpec, PairUniverse,
    PriceSeries, ReturnSeries, Symbol, TimeSeries, Window,
};

/// `len` consecutive fixture dates starting 2024-01-01 (28-day months).
pub fn dates(len: usize) -> Vec<String> {
    (0..len)
        .map(|offset| format!("2024-{:02}-{:02}", offset / 28 + 1, offset % 28 + 1))
        .collect()
}

pub fn series(values: &[f64]) -> TimeSeries {
    let dates = dates(values.len());
    TimeSeries::from_pairs(dates.iter().map(String::as_str).zip(values.iter().copied()))
        .expect("fixture series")
}

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("fixture symbol")
}

/// History with unit volume on every close.
pub fn history(raw: &str, close: &[f64]) -> InstrumentHistory {
    InstrumentHistory::new(symbol(raw), series(close), series(&vec![1.0; close.len()]))
}

pub fn fixture_year() -> DateRange {
    DateRange::parse("2024-01-01", "2024-12-31").expect("fixture range")
}

/// Deterministic zero-mean noise in [-0.5, 0.5]; distinct for `i < 101`.
pub fn noise(i: usize) -> f64 {
    ((i * 7919) % 101) as f64 / 100.0 - 0.5
}

/// Base closes from noisy daily moves, and an alt that returns exactly
/// `leverage` times the base every day.
pub fn leveraged_pair(len: usize, leverage: f64) -> (PriceSeries, PriceSeries) {
    let mut base = Vec::with_capacity(len);
    let mut alt = Vec::with_capacity(len);
    let (mut base_level, mut alt_level) = (100.0, 50.0);
    for i in 0..len {
        if i > 0 {
            let change = 0.02 * noise(i);
            base_level *= 1.0 + change;
            alt_level *= 1.0 + leverage * change;
        }
        base.push(base_level);
        alt.push(alt_level);
    }
    (series(&base), series(&alt))
}

/// A trending base with an alt that tracks it up to small stationary noise.
pub fn cointegrated_pair(len: usize) -> (PriceSeries, PriceSeries) {
    let base = (0..len)
        .map(|i| 100.0 + i as f64 * 0.5)
        .collect::<Vec<_>>();
    let alt = base
        .iter()
        .enumerate()
        .map(|(i, price)| price * (1.0 + 0.02 * noise(i)))
        .collect::<Vec<_>>();
    (series(&base), series(&alt))
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
