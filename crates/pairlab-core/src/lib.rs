//! # Pairlab Core
//!
//! Hedge-ratio and pairs statistics engine for a base instrument and a
//! related alt instrument (for example an index and a leveraged ETF).
//!
//! ## Overview
//!
//! This crate is pure computation over immutable, date-indexed series:
//!
//! - **Returns and alignment**: every multi-series operation intersects dates first
//! - **Hedge-ratio estimators**: OLS, WLS, Theil–Sen and rolling OLS
//! - **Cointegration**: log-price regression with an ADF test of the spread
//! - **Pair metrics**: one [`PairMetrics`] record per pair, parallel over a universe
//! - **Hedge tooling**: sizing, static P&L simulation, hedge effectiveness
//!
//! It performs no I/O. Data retrieval, retries and presentation belong to
//! the caller.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analysis`] | Hedge-method selection and the end-to-end hedge workflow |
//! | [`cointegration`] | Log-price spread regression and its ADF diagnosis |
//! | [`domain`] | Symbols, dates, series and pair definitions |
//! | [`effectiveness`] | Variance reduction and position volatility |
//! | [`error`] | Validation errors |
//! | [`estimate`] | Numeric results that may be undefined |
//! | [`hedge`] | Base-leg sizing |
//! | [`metrics`] | Pair metrics aggregation |
//! | [`pnl`] | Two-leg P&L simulation |
//! | [`regression`] | OLS / WLS / Theil–Sen slopes |
//! | [`returns`] | Price ↔ return transforms |
//! | [`rolling`] | Rolling OLS beta |
//! | [`spread`] | Spread Bollinger bands |
//! | [`stationarity`] | Augmented Dickey–Fuller test |
//! | [`stats`] | Descriptive statistics and linear fits |
//!
//! ## Quick Start
//!
//! ```rust
//! use pairlab_core::{beta_ols, returns, PriceSeries};
//!
//! let base = PriceSeries::from_pairs([
//!     ("2024-01-02", 100.0),
//!     ("2024-01-03", 101.0),
//!     ("2024-01-04", 99.0),
//!     ("2024-01-05", 103.0),
//!     ("2024-01-08", 104.0),
//!     ("2024-01-09", 102.0),
//! ])?;
//! let alt = PriceSeries::from_pairs([
//!     ("2024-01-02", 50.0),
//!     ("2024-01-03", 52.0),
//!     ("2024-01-04", 48.0),
//!     ("2024-01-05", 55.0),
//!     ("2024-01-08", 56.0),
//!     ("2024-01-09", 53.0),
//! ])?;
//!
//! let beta = beta_ols(&returns(&base), &returns(&alt));
//! assert!(beta.is_defined());
//! # Ok::<(), pairlab_core::ValidationError>(())
//! ```
//!
//! ## Undefined Values
//!
//! Insufficient data never raises. Fewer than 5 aligned observations for a
//! regression, fewer than 3 for a correlation, a zero denominator or an
//! incomplete trailing window all produce [`Estimate::Undefined`], which
//! propagates through later arithmetic. Only caller contract violations such
//! as a zero window are errors ([`ValidationError`]).

pub mod analysis;
pub mod cointegration;
pub mod domain;
pub mod effectiveness;
pub mod error;
pub mod estimate;
pub mod hedge;
pub mod metrics;
pub mod pnl;
pub mod regression;
pub mod returns;
pub mod rolling;
pub mod spread;
pub mod stationarity;
pub mod stats;

// Domain models
pub use domain::{
    AlignedPair, DateRange, InstrumentHistory, MarketData, PairSpec, PairUniverse, PriceSeries,
    ReturnSeries, RollingBetaSeries, Symbol, TimeSeries, TradingDate, VolumeSeries, Window,
};

// Error types
pub use error::{CoreError, ValidationError};

pub use estimate::Estimate;

// Analytics
pub use analysis::{analyze_hedge, estimate_hedge_ratio, HedgeAnalysis, HedgeRatio, HedgeRequest};
pub use cointegration::{cointegration, CointegrationResult};
pub use effectiveness::{hedge_effectiveness, hedged_portfolio_returns, position_volatility};
pub use hedge::{hedge_shares, HedgeSizing};
pub use metrics::{
    summarize, summarize_pair, summarize_universe, PairMetrics, MIN_CORRELATION_OBSERVATIONS,
    TRADING_DAYS, VOLUME_AVERAGE_WINDOW,
};
pub use pnl::{simulate_hedge_pnl, PnlRecord, PnlTable};
pub use regression::{
    beta_ols, beta_robust, beta_wls, regress, HedgeMethod, RegressionSummary,
    MIN_REGRESSION_OBSERVATIONS, WLS_VOLATILITY_WINDOW,
};
pub use returns::{cumulative_index, normalized_index, returns, total_return};
pub use rolling::rolling_beta;
pub use spread::{spread_bands, SpreadBands, SpreadPoint};
pub use stationarity::{adf_test, AdfResult, CriticalValues, ADF_MAX_LAG};
