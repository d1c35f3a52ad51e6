use thiserror::Error;

/// Validation and contract errors exposed by `pairlab-core`.
///
/// These are only produced by constructors of domain types. Analytics never
/// fail on insufficient data; they return [`crate::Estimate::Undefined`] or an
/// empty series instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("date range start {start} is after end {end}")]
    InvertedDateRange { start: String, end: String },
    #[error("series contains duplicate date {date}")]
    DuplicateDate { date: String },

    #[error("window must be at least 1 observation")]
    InvalidWindow,
    #[error("window {value} outside allowed range {min}..={max}")]
    WindowOutOfRange { value: usize, min: usize, max: usize },

    #[error("invalid hedge method '{value}', expected one of ols, robust, wls, coint")]
    InvalidHedgeMethod { value: String },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("pair must be BASE:ALT or BASE:ALT:RATIO: '{value}'")]
    InvalidPairFormat { value: String },
    #[error("pair base and alt must differ: '{symbol}'")]
    SelfPair { symbol: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
