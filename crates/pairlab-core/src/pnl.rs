//! Static two-leg P&L simulation.

use serde::Serialize;

use crate::{AlignedPair, PriceSeries, TradingDate};

/// One simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PnlRecord {
    pub date: TradingDate,
    pub alt_pnl: f64,
    pub base_pnl: f64,
    pub total_pnl: f64,
    pub cum_pnl: f64,
}

/// Per-date P&L table, in date order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PnlTable {
    rows: Vec<PnlRecord>,
}

impl PnlTable {
    pub fn rows(&self) -> &[PnlRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cumulative P&L on the last simulated date.
    pub fn final_pnl(&self) -> Option<f64> {
        self.rows.last().map(|row| row.cum_pnl)
    }
}

/// Hold `qty_alt` alt and `qty_base` base shares over the common dates of the
/// two price series, with no rebalancing.
///
/// Each leg's daily P&L is quantity × price change since the previous common
/// date; the first date's change is zero.
pub fn simulate_hedge_pnl(
    qty_alt: f64,
    qty_base: f64,
    alt_prices: &PriceSeries,
    base_prices: &PriceSeries,
) -> PnlTable {
    let aligned = AlignedPair::intersect(alt_prices, base_prices);
    let (alt, base) = (aligned.x(), aligned.y());

    let mut cum_pnl = 0.0;
    let rows = aligned
        .dates()
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let (alt_change, base_change) = match index {
                0 => (0.0, 0.0),
                _ => (alt[index] - alt[index - 1], base[index] - base[index - 1]),
            };
            let alt_pnl = qty_alt * alt_change;
            let base_pnl = qty_base * base_change;
            let total_pnl = alt_pnl + base_pnl;
            cum_pnl += total_pnl;
            PnlRecord {
                date: *date,
                alt_pnl,
                base_pnl,
                total_pnl,
                cum_pnl,
            }
        })
        .collect();

    PnlTable { rows }
}
