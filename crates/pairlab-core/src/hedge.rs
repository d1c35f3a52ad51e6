use serde::Serialize;

use crate::Estimate;

/// Base-instrument position that offsets a given alt quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeSizing {
    /// Base shares per one alt share: `β × price_alt / price_base`.
    pub factor_shares_per_alt: f64,
    /// `factor × qty_alt`.
    pub shares_base_for_qty_alt: f64,
}

/// Size the base leg for `qty_alt` alt shares.
///
/// Returns `None` when the base price is zero, beta is undefined, or any
/// input is non-finite.
pub fn hedge_shares(
    qty_alt: f64,
    price_alt: f64,
    price_base: f64,
    beta: Estimate,
) -> Option<HedgeSizing> {
    let factor = (beta * price_alt / price_base).value()?;
    let shares = Estimate::new(factor * qty_alt).value()?;
    Some(HedgeSizing {
        factor_shares_per_alt: factor,
        shares_base_for_qty_alt: shares,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_base_leg_from_beta_and_prices() {
        let sizing = hedge_shares(1000.0, 50.0, 100.0, Estimate::new(2.0)).expect("sizing");
        assert!((sizing.factor_shares_per_alt - 1.0).abs() < 1e-12);
        assert!((sizing.shares_base_for_qty_alt - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn zero_base_price_is_undefined() {
        assert!(hedge_shares(1000.0, 50.0, 0.0, Estimate::new(2.0)).is_none());
    }

    #[test]
    fn undefined_inputs_are_undefined() {
        assert!(hedge_shares(1000.0, 50.0, 100.0, Estimate::Undefined).is_none());
        assert!(hedge_shares(f64::NAN, 50.0, 100.0, Estimate::new(1.0)).is_none());
        assert!(hedge_shares(1000.0, f64::INFINITY, 100.0, Estimate::new(1.0)).is_none());
    }

    #[test]
    fn negative_beta_flips_the_sign() {
        let sizing = hedge_shares(10.0, 20.0, 40.0, Estimate::new(-3.0)).expect("sizing");
        assert!((sizing.shares_base_for_qty_alt + 15.0).abs() < 1e-12);
    }
}
