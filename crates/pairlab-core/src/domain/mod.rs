//! # Domain Models
//!
//! Strongly-typed inputs of the estimation engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated instrument identifier |
//! | [`TradingDate`] | Calendar date of a daily observation |
//! | [`DateRange`] | Inclusive date range label / slice |
//! | [`TimeSeries`] | Ascending, gap-free date-indexed values |
//! | [`AlignedPair`] | Intersection of two series by date |
//! | [`Window`] | Positive rolling-window length |
//! | [`InstrumentHistory`] | Close and volume series for one instrument |
//! | [`MarketData`] | Histories keyed by symbol |
//! | [`PairSpec`] | Base/alt pair with optional target ratio |
//! | [`PairUniverse`] | Filterable list of pairs |
//!
//! Construction validates invariants; missing observations are dropped as
//! gaps rather than interpolated:
//!
//! ```rust
//! use pairlab_core::PriceSeries;
//!
//! let close = PriceSeries::from_pairs([
//!     ("2024-01-02", 100.0),
//!     ("2024-01-03", f64::NAN),
//!     ("2024-01-04", 101.0),
//! ])?;
//! assert_eq!(close.len(), 2);
//! # Ok::<(), pairlab_core::ValidationError>(())
//! ```

mod date;
mod market;
mod pair;
mod series;
mod symbol;

pub use date::{DateRange, TradingDate};
pub use market::{InstrumentHistory, MarketData};
pub use pair::{PairSpec, PairUniverse};
pub use series::{
    AlignedPair, PriceSeries, ReturnSeries, RollingBetaSeries, TimeSeries, VolumeSeries, Window,
};
pub use symbol::Symbol;
