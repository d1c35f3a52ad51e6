//! Hedged spread with Bollinger bands.

use serde::Serialize;

use crate::returns::normalized_index;
use crate::stats::{self, Ddof};
use crate::{AlignedPair, Estimate, PriceSeries, TradingDate};

pub const MIN_BAND_WINDOW: usize = 20;
pub const MAX_BAND_WINDOW: usize = 60;
/// Band half-width in standard deviations.
pub const BAND_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadPoint {
    pub date: TradingDate,
    pub spread: Estimate,
    pub mean: Estimate,
    pub upper: Estimate,
    pub lower: Estimate,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpreadBands {
    pub window: usize,
    pub points: Vec<SpreadPoint>,
}

impl SpreadBands {
    /// The most recent point whose bands are defined.
    pub fn latest_banded(&self) -> Option<&SpreadPoint> {
        self.points.iter().rev().find(|point| point.mean.is_defined())
    }
}

/// Band window for a spread of `len` points: `len / 6` clamped to 20..=60.
pub fn band_window(len: usize) -> usize {
    (len / 6).clamp(MIN_BAND_WINDOW, MAX_BAND_WINDOW)
}

/// Spread `alt_norm − β·base_norm` of the two closes rebased to 100 on their
/// first common date, with a rolling mean and ±2σ bands (sample std).
pub fn spread_bands(base_close: &PriceSeries, alt_close: &PriceSeries, beta: Estimate) -> SpreadBands {
    let aligned = AlignedPair::intersect(base_close, alt_close);
    let base_norm = normalized_index(&aligned.x_series());
    let alt_norm = normalized_index(&aligned.y_series());

    let spread = base_norm
        .values()
        .iter()
        .zip(alt_norm.values())
        .map(|(base, alt)| *alt - beta * *base)
        .collect::<Vec<_>>();

    let window = band_window(spread.len());
    let points = aligned
        .dates()
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let (mean, std) = match index.checked_sub(window - 1) {
                Some(start) => window_stats(&spread[start..=index]),
                None => (Estimate::Undefined, Estimate::Undefined),
            };
            SpreadPoint {
                date: *date,
                spread: spread[index],
                mean,
                upper: mean + std * BAND_WIDTH,
                lower: mean - std * BAND_WIDTH,
            }
        })
        .collect();

    SpreadBands { window, points }
}

fn window_stats(window: &[Estimate]) -> (Estimate, Estimate) {
    let values = window
        .iter()
        .map(|value| value.value())
        .collect::<Option<Vec<_>>>();
    match values {
        Some(values) => (stats::mean(&values), stats::std_dev(&values, Ddof::Sample)),
        None => (Estimate::Undefined, Estimate::Undefined),
    }
}
