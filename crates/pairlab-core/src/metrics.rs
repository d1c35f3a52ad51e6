//! # Pair metrics
//!
//! Consolidates alignment, returns, regression, correlation, volatility and
//! volume into one [`PairMetrics`] record per pair. All sub-computations read
//! from the same date intersection of the two close series.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::regression::{regress_aligned, RegressionSummary};
use crate::returns::{returns, total_return};
use crate::stats::{self, Ddof};
use crate::{
    AlignedPair, DateRange, Estimate, InstrumentHistory, MarketData, PairSpec, ReturnSeries,
    Symbol, TradingDate, VolumeSeries,
};

/// Trading periods per year used to annualize daily volatility.
pub const TRADING_DAYS: u32 = 252;

/// Trailing observations in the average-volume figure.
pub const VOLUME_AVERAGE_WINDOW: usize = 30;

/// Fewer aligned return observations than this leave correlation undefined.
pub const MIN_CORRELATION_OBSERVATIONS: usize = 3;

/// Fractional base move used by the sensitivity figures (1%).
const ONE_PERCENT: f64 = 0.01;

/// Summary statistics of one base/alt pair over one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairMetrics {
    pub base: Symbol,
    pub alt: Symbol,
    pub start: TradingDate,
    pub end: TradingDate,
    /// Aligned return observations.
    pub n_obs: usize,
    pub ret_base: Estimate,
    pub ret_alt: Estimate,
    pub vol_base: Estimate,
    pub vol_alt: Estimate,
    pub avg_vol_base: Estimate,
    pub avg_vol_alt: Estimate,
    pub beta_alt_on_base: Estimate,
    pub corr: Estimate,
    pub r2: Estimate,
    /// Expected alt move for a 1% base move.
    pub alt_move_if_base_1pct: Estimate,
    /// Base move needed for a 1% alt move.
    pub base_move_for_alt_1pct: Estimate,
    pub target_ratio: Option<f64>,
}

impl PairMetrics {
    /// Effective beta minus the advertised target ratio.
    pub fn target_deviation(&self) -> Estimate {
        self.beta_alt_on_base - Estimate::from(self.target_ratio)
    }

    pub fn label(&self) -> String {
        format!("{}->{}", self.base, self.alt)
    }
}

/// Compute the metrics record for `alt` against `base`.
///
/// Closes are intersected by date first; returns, regression, correlation,
/// volatility and total return all derive from that intersection. Average
/// volume is read at the latest aligned date with a complete trailing
/// window in each leg's own volume history.
pub fn summarize_pair(
    base: &InstrumentHistory,
    alt: &InstrumentHistory,
    target_ratio: Option<f64>,
    period: &DateRange,
) -> PairMetrics {
    let closes = AlignedPair::intersect(&base.close, &alt.close);
    let base_close = closes.x_series();
    let alt_close = closes.y_series();

    let base_ret = returns(&base_close);
    let alt_ret = returns(&alt_close);
    let aligned_returns = AlignedPair::intersect(&base_ret, &alt_ret);
    debug!(
        base = %base.symbol,
        alt = %alt.symbol,
        aligned_closes = closes.len(),
        aligned_returns = aligned_returns.len(),
        "aligned pair"
    );

    let RegressionSummary {
        beta, r_squared, ..
    } = regress_aligned(&aligned_returns);
    let corr = if aligned_returns.len() >= MIN_CORRELATION_OBSERVATIONS {
        stats::pearson(aligned_returns.x(), aligned_returns.y())
    } else {
        Estimate::Undefined
    };

    PairMetrics {
        base: base.symbol.clone(),
        alt: alt.symbol.clone(),
        start: period.start,
        end: period.end,
        n_obs: aligned_returns.len(),
        ret_base: total_return(&base_close),
        ret_alt: total_return(&alt_close),
        vol_base: annualized_volatility(&base_ret, Ddof::Population),
        vol_alt: annualized_volatility(&alt_ret, Ddof::Population),
        avg_vol_base: trailing_average_volume(&base.volume, closes.dates()),
        avg_vol_alt: trailing_average_volume(&alt.volume, closes.dates()),
        beta_alt_on_base: beta,
        corr,
        r2: r_squared,
        alt_move_if_base_1pct: beta * ONE_PERCENT,
        base_move_for_alt_1pct: ONE_PERCENT / beta,
        target_ratio,
    }
}

/// Look up both legs of `pair` in `market` and summarize them. A leg the
/// data collaborator did not supply is treated as an empty history.
pub fn summarize(pair: &PairSpec, market: &MarketData, period: &DateRange) -> PairMetrics {
    let base = history_or_empty(market, &pair.base, period);
    let alt = history_or_empty(market, &pair.alt, period);
    summarize_pair(&base, &alt, pair.target_ratio, period)
}

/// Summarize every pair on the rayon pool. Pairs are independent; results
/// are returned in the order of `pairs`.
pub fn summarize_universe(
    pairs: &[PairSpec],
    market: &MarketData,
    period: &DateRange,
) -> Vec<PairMetrics> {
    pairs
        .par_iter()
        .map(|pair| summarize(pair, market, period))
        .collect()
}

fn history_or_empty(market: &MarketData, symbol: &Symbol, period: &DateRange) -> InstrumentHistory {
    match market.get(symbol) {
        Some(history) => history.with_range(period),
        None => {
            warn!(%symbol, "no history supplied; metrics will be undefined");
            InstrumentHistory::empty(symbol.clone())
        }
    }
}

/// Standard deviation of returns scaled by `√252`.
pub fn annualized_volatility(returns: &ReturnSeries, ddof: Ddof) -> Estimate {
    stats::std_dev(returns.values(), ddof) * f64::from(TRADING_DAYS).sqrt()
}

/// Mean of the trailing [`VOLUME_AVERAGE_WINDOW`] volume observations ending
/// at the latest of `aligned_dates` where such a window is complete.
fn trailing_average_volume(volume: &VolumeSeries, aligned_dates: &[TradingDate]) -> Estimate {
    aligned_dates
        .iter()
        .rev()
        .filter_map(|date| volume.position(*date))
        .find(|position| *position + 1 >= VOLUME_AVERAGE_WINDOW)
        .map_or(Estimate::Undefined, |position| {
            stats::mean(&volume.values()[position + 1 - VOLUME_AVERAGE_WINDOW..=position])
        })
}
