//! Behavior-driven tests for pair metrics
//!
//! These tests verify what a user sees in the summary table: which dates
//! count, which figures are undefined, and how a universe is reported.

use pairlab_tests::*;

fn scenario_market() -> MarketData {
    [
        history("SPY", &[100.0, 101.0, 99.0, 103.0, 104.0, 102.0]),
        history("SSO", &[50.0, 52.0, 48.0, 55.0, 56.0, 53.0]),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Pair Metrics: Single Pair
// =============================================================================

#[test]
fn when_user_summarizes_the_reference_pair_beta_comes_from_the_regression() {
    // Given: Six aligned closes moving in the same direction every day
    let base = history("SPY", &[100.0, 101.0, 99.0, 103.0, 104.0, 102.0]);
    let alt = history("SSO", &[50.0, 52.0, 48.0, 55.0, 56.0, 53.0]);

    // When: The pair is summarized with a 2x target
    let metrics = summarize_pair(&base, &alt, Some(2.0), &fixture_year());

    // Then: Five return observations and the fitted slope
    assert_eq!(metrics.n_obs, 5);
    let beta = metrics.beta_alt_on_base.unwrap_or(f64::NAN);
    assert_close(beta, 3.4852, 1e-3);
    let corr = metrics.corr.unwrap_or(f64::NAN);
    assert!(corr > 0.99, "corr was {corr}");
    assert_close(metrics.r2.unwrap_or(f64::NAN), corr * corr, 1e-9);
    assert_close(metrics.target_deviation().unwrap_or(f64::NAN), beta - 2.0, 1e-12);
    assert_eq!(metrics.label(), "SPY->SSO");
}

#[test]
fn when_one_alt_price_is_unusable_that_date_is_dropped_not_fatal() {
    // Given: The reference pair with a garbage alt close on the fourth day
    let base = history("SPY", &[100.0, 101.0, 99.0, 103.0, 104.0, 102.0]);
    let alt = history("SSO", &[50.0, 52.0, 48.0, f64::NAN, 56.0, 53.0]);

    // When
    let metrics = summarize_pair(&base, &alt, None, &fixture_year());

    // Then: Five common closes leave four returns
    assert_eq!(metrics.n_obs, 4);
    assert!(metrics.beta_alt_on_base.is_undefined());
    assert!(metrics.corr.is_defined());
    assert!(metrics.target_deviation().is_undefined());
}

#[test]
fn when_the_period_is_narrowed_only_its_dates_are_used() {
    // Given: The reference market and a range covering the first four days
    let market = scenario_market();
    let pair = PairSpec::new(symbol("SPY"), symbol("SSO"), Some(2.0)).expect("pair");
    let period = DateRange::parse("2024-01-01", "2024-01-04").expect("range");

    // When
    let metrics = summarize(&pair, &market, &period);

    // Then: Three returns; total return reads 103/100
    assert_eq!(metrics.n_obs, 3);
    assert_eq!(metrics.start, period.start);
    assert_eq!(metrics.end, period.end);
    assert_close(metrics.ret_base.unwrap_or(f64::NAN), 0.03, 1e-12);
    assert_close(metrics.ret_alt.unwrap_or(f64::NAN), 0.10, 1e-12);
}

#[test]
fn when_a_leg_has_no_history_every_figure_is_undefined() {
    // Given: A pair whose alt is absent from the market
    let market = scenario_market();
    let pair = PairSpec::new(symbol("SPY"), symbol("UPRO"), Some(3.0)).expect("pair");

    // When
    let metrics = summarize(&pair, &market, &fixture_year());

    // Then: The record exists; every figure reads the empty intersection
    assert_eq!(metrics.n_obs, 0);
    assert!(metrics.ret_base.is_undefined());
    assert!(metrics.ret_alt.is_undefined());
    assert!(metrics.beta_alt_on_base.is_undefined());
    assert!(metrics.corr.is_undefined());
    assert!(metrics.alt_move_if_base_1pct.is_undefined());
}

#[test]
fn when_volatility_is_reported_it_is_annualized() {
    // Given: A base alternating +1% / -1%
    let closes = (0..41)
        .scan(100.0, |level, i| {
            if i > 0 {
                *level *= if i % 2 == 0 { 0.99 } else { 1.01 };
            }
            Some(*level)
        })
        .collect::<Vec<_>>();
    let base = history("SPY", &closes);
    let alt = history("SSO", &closes);

    // When
    let metrics = summarize_pair(&base, &alt, None, &fixture_year());

    // Then: Population std of ±1% is 1%, times √252
    assert_close(
        metrics.vol_base.unwrap_or(f64::NAN),
        0.01 * 252f64.sqrt(),
        1e-9,
    );
    assert_close(metrics.beta_alt_on_base.unwrap_or(f64::NAN), 1.0, 1e-9);
}

// =============================================================================
// Pair Metrics: Universe
// =============================================================================

#[test]
fn when_a_universe_is_summarized_results_keep_the_input_order() {
    // Given: Three pairs, one referencing a missing instrument
    let market = scenario_market();
    let pairs = vec![
        PairSpec::parse("SPY:SSO:2").expect("pair"),
        PairSpec::parse("SPY:UPRO:3").expect("pair"),
        PairSpec::parse("SSO:SPY").expect("pair"),
    ];

    // When
    let metrics = summarize_universe(&pairs, &market, &fixture_year());

    // Then: One record per pair, in order
    let labels = metrics.iter().map(|m| m.label()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["SPY->SSO", "SPY->UPRO", "SSO->SPY"]);
    assert!(metrics[1].beta_alt_on_base.is_undefined());
    assert_eq!(metrics[2].target_ratio, None);
}

#[test]
fn when_a_universe_is_filtered_by_issuer_only_matching_pairs_remain() {
    // Given: Pairs from two issuers
    let universe = PairUniverse::new(vec![
        PairSpec::parse("SPY:SSO:2").expect("pair").with_issuer("ProShares"),
        PairSpec::parse("IWM:TNA:3").expect("pair").with_issuer("Direxion"),
        PairSpec::parse("QQQ:QLD:2").expect("pair").with_issuer("ProShares"),
    ])
    .expect("universe");

    // When
    let proshares = universe.filter(&[String::from("ProShares")], &[]);
    let iwm = universe.filter(&[], &[symbol("IWM")]);

    // Then
    assert_eq!(proshares.len(), 2);
    assert_eq!(iwm.len(), 1);
    assert_eq!(iwm.pairs()[0].alt, symbol("TNA"));
}
