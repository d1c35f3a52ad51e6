//! JSON configuration: the pair universe and command defaults.
//!
//! ```json
//! {
//!   "pairs": [
//!     { "base": "QQQ", "alt": "TQQQ", "target_ratio": 3.0, "issuer": "ProShares" }
//!   ],
//!   "rolling_window": 60,
//!   "qty_alt": 1000.0,
//!   "issuers": [],
//!   "bases": []
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use std::fs;
use std::path::Path;

use pairlab_core::{PairSpec, PairUniverse, Symbol, Window};
use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

pub const MIN_ROLLING_WINDOW: usize = 20;
pub const MAX_ROLLING_WINDOW: usize = 200;
pub const DEFAULT_ROLLING_WINDOW: usize = 60;
pub const DEFAULT_QTY_ALT: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PairLabConfig {
    pub pairs: PairUniverse,
    pub rolling_window: usize,
    pub qty_alt: f64,
    pub issuers: Vec<String>,
    pub bases: Vec<Symbol>,
}

impl Default for PairLabConfig {
    fn default() -> Self {
        Self {
            pairs: default_universe(),
            rolling_window: DEFAULT_ROLLING_WINDOW,
            qty_alt: DEFAULT_QTY_ALT,
            issuers: Vec::new(),
            bases: Vec::new(),
        }
    }
}

impl PairLabConfig {
    /// Read `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        debug!(path = %path.display(), "loading config");

        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|error| CliError::Config {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        config.validate().map_err(|error| CliError::Config {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), pairlab_core::ValidationError> {
        PairUniverse::new(self.pairs.pairs().to_vec())?;
        self.rolling_window(None)?;
        if !self.qty_alt.is_finite() {
            return Err(pairlab_core::ValidationError::NonFiniteValue { field: "qty_alt" });
        }
        Ok(())
    }

    /// `requested` or the configured window, bounded to 20..=200.
    pub fn rolling_window(
        &self,
        requested: Option<usize>,
    ) -> Result<Window, pairlab_core::ValidationError> {
        Window::bounded(
            requested.unwrap_or(self.rolling_window),
            MIN_ROLLING_WINDOW,
            MAX_ROLLING_WINDOW,
        )
    }

    /// The configured universe after the configured issuer/base filters.
    pub fn selected_pairs(&self) -> PairUniverse {
        self.pairs.filter(&self.issuers, &self.bases)
    }
}

/// Daily leveraged and inverse ETFs against their benchmark.
fn default_universe() -> PairUniverse {
    const PAIRS: [(&str, &str, f64, &str); 8] = [
        ("SPY", "SSO", 2.0, "ProShares"),
        ("SPY", "UPRO", 3.0, "ProShares"),
        ("SPY", "SPXU", -3.0, "ProShares"),
        ("QQQ", "QLD", 2.0, "ProShares"),
        ("QQQ", "TQQQ", 3.0, "ProShares"),
        ("QQQ", "SQQQ", -3.0, "ProShares"),
        ("IWM", "TNA", 3.0, "Direxion"),
        ("IWM", "TZA", -3.0, "Direxion"),
    ];

    let pairs = PAIRS
        .iter()
        .filter_map(|(base, alt, target, issuer)| {
            let base = Symbol::parse(base).ok()?;
            let alt = Symbol::parse(alt).ok()?;
            PairSpec::new(base, alt, Some(*target))
                .ok()
                .map(|pair| pair.with_issuer(*issuer))
        })
        .collect();
    PairUniverse::new(pairs).unwrap_or_default()
}
