//! # Hedge analysis
//!
//! End-to-end workflow for one pair: pick a hedge ratio with the requested
//! [`HedgeMethod`], size the base leg at the latest common date, then measure
//! how the static hedge would have behaved over the history.
//!
//! ```text
//! closes ──► hedge ratio ──► rolling beta
//!                  │
//!                  ├──► spread bands
//!                  └──► sizing ──► P&L ──► effectiveness / volatility
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::cointegration::{cointegration, CointegrationResult};
use crate::effectiveness::{hedge_effectiveness, hedged_portfolio_returns, position_volatility};
use crate::hedge::{hedge_shares, HedgeSizing};
use crate::pnl::{simulate_hedge_pnl, PnlTable};
use crate::regression::{beta_ols, beta_robust, beta_wls, HedgeMethod};
use crate::returns::returns;
use crate::rolling::rolling_beta;
use crate::spread::{spread_bands, SpreadBands};
use crate::{AlignedPair, Estimate, PriceSeries, ReturnSeries, RollingBetaSeries, Window};

/// Hedge ratio of alt on base and, for the cointegration method, the full
/// spread diagnosis it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeRatio {
    pub method: HedgeMethod,
    pub beta: Estimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cointegration: Option<CointegrationResult>,
}

/// Estimate the hedge ratio with `method`.
///
/// Regression methods work on daily returns; cointegration works on log
/// prices.
pub fn estimate_hedge_ratio(
    method: HedgeMethod,
    base_close: &PriceSeries,
    alt_close: &PriceSeries,
) -> HedgeRatio {
    let regression = |estimator: fn(&ReturnSeries, &ReturnSeries) -> Estimate| {
        estimator(&returns(base_close), &returns(alt_close))
    };
    let (beta, cointegration) = match method {
        HedgeMethod::Ols => (regression(beta_ols), None),
        HedgeMethod::Robust => (regression(beta_robust), None),
        HedgeMethod::Wls => (regression(beta_wls), None),
        HedgeMethod::Cointegration => {
            let result = cointegration(base_close, alt_close);
            (result.beta, Some(result))
        }
    };
    debug!(%method, %beta, "estimated hedge ratio");

    HedgeRatio {
        method,
        beta,
        cointegration,
    }
}

/// Parameters of one hedge analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeRequest {
    pub method: HedgeMethod,
    pub window: Window,
    /// Alt shares held long.
    pub qty_alt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HedgeAnalysis {
    pub hedge_ratio: HedgeRatio,
    pub rolling_beta: RollingBetaSeries,
    pub spread: SpreadBands,
    /// Sizing at the latest common date.
    pub sizing: Option<HedgeSizing>,
    pub qty_alt: f64,
    /// Base shares held: the negated sizing, so the hedge is short base for a
    /// positive beta.
    pub qty_base: Estimate,
    pub pnl: PnlTable,
    pub effectiveness: Estimate,
    pub unhedged_volatility: Estimate,
    pub hedged_volatility: Estimate,
}

/// Run the full hedge workflow over the common dates of the two closes.
pub fn analyze_hedge(
    base_close: &PriceSeries,
    alt_close: &PriceSeries,
    request: &HedgeRequest,
) -> HedgeAnalysis {
    let aligned = AlignedPair::intersect(base_close, alt_close);
    let base = aligned.x_series();
    let alt = aligned.y_series();

    let hedge_ratio = estimate_hedge_ratio(request.method, &base, &alt);
    let rolling = rolling_beta(&returns(&base), &returns(&alt), request.window);
    let spread = spread_bands(&base, &alt, hedge_ratio.beta);

    let sizing = aligned
        .x()
        .last()
        .zip(aligned.y().last())
        .and_then(|(base_last, alt_last)| {
            hedge_shares(request.qty_alt, *alt_last, *base_last, hedge_ratio.beta)
        });

    let unhedged = returns(&alt);
    let unhedged_volatility = position_volatility(&unhedged);
    let mut analysis = HedgeAnalysis {
        hedge_ratio,
        rolling_beta: rolling,
        spread,
        sizing,
        qty_alt: request.qty_alt,
        qty_base: Estimate::Undefined,
        pnl: PnlTable::default(),
        effectiveness: Estimate::Undefined,
        unhedged_volatility,
        hedged_volatility: Estimate::Undefined,
    };

    let Some(sizing) = sizing else {
        warn!(
            method = %request.method,
            observations = aligned.len(),
            "hedge ratio undefined; skipping P&L simulation"
        );
        return analysis;
    };

    let qty_base = -sizing.shares_base_for_qty_alt;
    let hedged = hedged_portfolio_returns(request.qty_alt, qty_base, &alt, &base);
    analysis.qty_base = Estimate::new(qty_base);
    analysis.pnl = simulate_hedge_pnl(request.qty_alt, qty_base, &alt, &base);
    analysis.effectiveness = hedge_effectiveness(&unhedged, &hedged);
    analysis.hedged_volatility = position_volatility(&hedged);
    analysis
}
