//! Property-based tests for estimator invariants
//!
//! These tests use proptest to check shape and bound guarantees across many
//! random price paths.

use pairlab_tests::*;
use proptest::prelude::*;

fn price_path(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1000.0f64, len)
}

proptest! {
    /// Returns drop exactly the first observation.
    #[test]
    fn returns_are_one_shorter_than_prices(prices in price_path(1..150)) {
        let changes = returns(&series(&prices));
        prop_assert_eq!(changes.len(), prices.len() - 1);
    }

    /// Compounding the returns rebuilds the price path.
    #[test]
    fn cumulative_index_inverts_returns(prices in price_path(2..150)) {
        let rebuilt = cumulative_index(prices[0], &returns(&series(&prices)));
        for (rebuilt, original) in rebuilt.values().iter().zip(&prices[1..]) {
            prop_assert!((rebuilt - original).abs() <= original * 1e-9);
        }
    }

    /// Rolling beta has one point per complete window and none otherwise.
    #[test]
    fn rolling_beta_length_matches_window_count(
        base in price_path(2..120),
        alt in price_path(2..120),
        window in 1usize..40,
    ) {
        let len = base.len().min(alt.len());
        let (x, y) = (returns(&series(&base[..len])), returns(&series(&alt[..len])));
        let rolling = rolling_beta(&x, &y, Window::new(window).expect("window"));

        let observations = len - 1;
        let expected = if observations >= window { observations - window + 1 } else { 0 };
        prop_assert_eq!(rolling.len(), expected);
    }

    /// Holding any quantities of flat instruments earns nothing.
    #[test]
    fn constant_prices_give_zero_pnl(
        price_alt in 1.0f64..500.0,
        price_base in 1.0f64..500.0,
        qty_alt in -10_000.0f64..10_000.0,
        qty_base in -10_000.0f64..10_000.0,
        len in 1usize..60,
    ) {
        let alt = series(&vec![price_alt; len]);
        let base = series(&vec![price_base; len]);

        let pnl = simulate_hedge_pnl(qty_alt, qty_base, &alt, &base);
        prop_assert_eq!(pnl.len(), len);
        for row in pnl.rows() {
            prop_assert_eq!(row.total_pnl, 0.0);
            prop_assert_eq!(row.cum_pnl, 0.0);
        }
    }

    /// Cumulative P&L is the running sum of daily totals.
    #[test]
    fn cumulative_pnl_is_running_total(
        alt in price_path(1..80),
        base in price_path(1..80),
        qty_alt in -1_000.0f64..1_000.0,
        qty_base in -1_000.0f64..1_000.0,
    ) {
        let pnl = simulate_hedge_pnl(qty_alt, qty_base, &series(&alt), &series(&base));
        let mut running = 0.0;
        for row in pnl.rows() {
            running += row.total_pnl;
            prop_assert!((row.cum_pnl - running).abs() <= 1e-6 * (1.0 + running.abs()));
            prop_assert!((row.total_pnl - row.alt_pnl - row.base_pnl).abs() <= 1e-9 * (1.0 + row.total_pnl.abs()));
        }
    }

    /// Hedging can never remove more than all of the variance.
    #[test]
    fn effectiveness_is_at_most_one(
        unhedged in prop::collection::vec(-0.1f64..0.1, 2..60),
        hedged in prop::collection::vec(-0.1f64..0.1, 2..60),
    ) {
        let effectiveness = hedge_effectiveness(&series(&unhedged), &series(&hedged));
        if let Some(value) = effectiveness.value() {
            prop_assert!(value <= 1.0);
        }
    }

    /// Correlation and R² stay within their ranges.
    #[test]
    fn pair_metrics_stay_in_range(base in price_path(6..80), alt in price_path(6..80)) {
        let metrics = summarize_pair(
            &history("SPY", &base),
            &history("SSO", &alt),
            None,
            &fixture_year(),
        );
        if let Some(corr) = metrics.corr.value() {
            prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&corr));
        }
        if let Some(r2) = metrics.r2.value() {
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&r2));
        }
        prop_assert_eq!(metrics.n_obs, base.len().min(alt.len()) - 1);
    }

    /// Base shares scale linearly with the alt quantity.
    #[test]
    fn hedge_size_is_linear_in_quantity(
        qty_alt in 1.0f64..100_000.0,
        price_alt in 1.0f64..500.0,
        price_base in 1.0f64..500.0,
        beta in -5.0f64..5.0,
    ) {
        let sizing = hedge_shares(qty_alt, price_alt, price_base, Estimate::new(beta))
            .expect("finite inputs size");
        let expected = sizing.factor_shares_per_alt * qty_alt;
        prop_assert!((sizing.shares_base_for_qty_alt - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
    }

    /// Theil-Sen recovers an exact line regardless of intercept.
    #[test]
    fn theil_sen_recovers_exact_slope(
        slope in -4.0f64..4.0,
        intercept in -0.01f64..0.01,
        len in 5usize..60,
    ) {
        let x = (0..len).map(|i| 0.01 * noise(i)).collect::<Vec<_>>();
        let y = x.iter().map(|x| intercept + slope * x).collect::<Vec<_>>();

        let beta = beta_robust(&series(&x), &series(&y)).unwrap_or(f64::NAN);
        prop_assert!((beta - slope).abs() <= 1e-9);
    }
}
