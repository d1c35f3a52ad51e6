use std::collections::HashMap;

use serde::Serialize;

use crate::{PriceSeries, Symbol, VolumeSeries};

/// Price and volume history supplied for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentHistory {
    pub symbol: Symbol,
    pub close: PriceSeries,
    pub volume: VolumeSeries,
}

impl InstrumentHistory {
    pub fn new(symbol: Symbol, close: PriceSeries, volume: VolumeSeries) -> Self {
        Self {
            symbol,
            close,
            volume,
        }
    }

    /// History with no observations, used for instruments the data
    /// collaborator could not supply.
    pub fn empty(symbol: Symbol) -> Self {
        Self::new(symbol, PriceSeries::empty(), VolumeSeries::empty())
    }

    pub fn with_range(&self, range: &crate::DateRange) -> Self {
        Self::new(
            self.symbol.clone(),
            self.close.slice(range),
            self.volume.slice(range),
        )
    }
}

/// Histories keyed by symbol, with no guarantee of identical date coverage.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    histories: HashMap<Symbol, InstrumentHistory>,
}

impl MarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, history: InstrumentHistory) -> Option<InstrumentHistory> {
        self.histories.insert(history.symbol.clone(), history)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&InstrumentHistory> {
        self.histories.get(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.histories.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.histories.keys()
    }
}

impl FromIterator<InstrumentHistory> for MarketData {
    fn from_iter<I: IntoIterator<Item = InstrumentHistory>>(iter: I) -> Self {
        let mut market = Self::new();
        for history in iter {
            market.insert(history);
        }
        market
    }
}
