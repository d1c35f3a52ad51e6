//! Long-format price history loader.
//!
//! One row per instrument and date:
//!
//! ```text
//! date,symbol,close,volume
//! 2024-01-02,QQQ,409.52,41263100
//! 2024-01-02,TQQQ,49.35,
//! ```
//!
//! Rows may come in any order. Empty or unparseable close/volume cells are
//! gaps; rows with an invalid date or symbol are skipped. Both are reported
//! as warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pairlab_core::{
    DateRange, InstrumentHistory, MarketData, PriceSeries, Symbol, TradingDate, VolumeSeries,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct PriceRow {
    date: String,
    symbol: String,
    #[serde(default)]
    close: String,
    #[serde(default)]
    volume: String,
}

#[derive(Debug, Default)]
struct Observations {
    close: Vec<(TradingDate, f64)>,
    volume: Vec<(TradingDate, f64)>,
    close_gaps: usize,
    volume_gaps: usize,
}

/// Histories read from one file, with the warnings raised while reading it.
#[derive(Debug)]
pub struct LoadedData {
    pub path: PathBuf,
    pub market: MarketData,
    /// First and last date with a close in any instrument.
    pub span: Option<DateRange>,
    pub warnings: Vec<String>,
}

impl LoadedData {
    pub fn history(&self, symbol: &Symbol) -> Result<&InstrumentHistory, CliError> {
        self.market
            .get(symbol)
            .ok_or_else(|| CliError::MissingInstrument {
                symbol: symbol.to_string(),
                path: self.path.clone(),
            })
    }
}

pub fn load_price_file(path: &Path) -> Result<LoadedData, CliError> {
    let csv_error = |source| CliError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut by_symbol: BTreeMap<Symbol, Observations> = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut skipped_rows = 0usize;

    for (index, row) in reader.deserialize::<PriceRow>().enumerate() {
        let row = row.map_err(csv_error)?;
        // header is line 1
        let line = index + 2;

        let (date, symbol) = match (TradingDate::parse(&row.date), Symbol::parse(&row.symbol)) {
            (Ok(date), Ok(symbol)) => (date, symbol),
            (Err(error), _) | (_, Err(error)) => {
                debug!(line, %error, "skipping row");
                skipped_rows += 1;
                continue;
            }
        };

        let observations = by_symbol.entry(symbol).or_default();
        match parse_cell(&row.close) {
            Some(close) => observations.close.push((date, close)),
            None => observations.close_gaps += 1,
        }
        match parse_cell(&row.volume) {
            Some(volume) => observations.volume.push((date, volume)),
            None => observations.volume_gaps += 1,
        }
    }

    if skipped_rows > 0 {
        warnings.push(format!(
            "{skipped_rows} row(s) with an invalid date or symbol were skipped"
        ));
    }

    let mut market = MarketData::new();
    for (symbol, observations) in by_symbol {
        if observations.close_gaps > 0 || observations.volume_gaps > 0 {
            warnings.push(format!(
                "{symbol}: {} close gap(s), {} volume gap(s) dropped",
                observations.close_gaps, observations.volume_gaps
            ));
        }
        let close = PriceSeries::from_observations(observations.close)?;
        let volume = VolumeSeries::from_observations(observations.volume)?;
        market.insert(InstrumentHistory::new(symbol, close, volume));
    }

    if market.is_empty() {
        return Err(CliError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    for warning in &warnings {
        warn!(path = %path.display(), "{warning}");
    }
    debug!(instruments = market.len(), path = %path.display(), "loaded price history");

    Ok(LoadedData {
        path: path.to_path_buf(),
        span: date_span(&market),
        market,
        warnings,
    })
}

fn parse_cell(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn date_span(market: &MarketData) -> Option<DateRange> {
    let histories = market
        .symbols()
        .filter_map(|symbol| market.get(symbol))
        .collect::<Vec<_>>();
    let start = histories
        .iter()
        .filter_map(|history| history.close.first().map(|(date, _)| date))
        .min()?;
    let end = histories
        .iter()
        .filter_map(|history| history.close.last().map(|(date, _)| date))
        .max()?;
    DateRange::new(start, end).ok()
}
