use tracing::debug;

use crate::stats;
use crate::{AlignedPair, Estimate, ReturnSeries, RollingBetaSeries, TimeSeries, Window};

/// OLS beta over every trailing `window` of the aligned return pair.
///
/// Each estimate is dated by the last observation of its window, so the
/// result has `len - window + 1` points, or none when fewer than `window`
/// aligned observations exist. A window with fewer than two points or a
/// constant `x` yields an undefined estimate at that position.
pub fn rolling_beta(
    x_returns: &ReturnSeries,
    y_returns: &ReturnSeries,
    window: Window,
) -> RollingBetaSeries {
    let aligned = AlignedPair::intersect(x_returns, y_returns);
    let size = window.get();
    if aligned.len() < size {
        debug!(
            observations = aligned.len(),
            window = size,
            "not enough aligned observations for rolling beta"
        );
        return TimeSeries::empty();
    }

    let (x, y) = (aligned.x(), aligned.y());
    let mut dates = Vec::with_capacity(aligned.len() - size + 1);
    let mut betas = Vec::with_capacity(aligned.len() - size + 1);
    for end in size..=aligned.len() {
        let start = end - size;
        let beta = stats::fit_ols(&x[start..end], &y[start..end])
            .map_or(Estimate::Undefined, |fit| Estimate::new(fit.beta));
        dates.push(aligned.dates()[end - 1]);
        betas.push(beta);
    }

    TimeSeries::from_sorted(dates, betas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> ReturnSeries {
        let dates = (1..=values.len())
            .map(|day| format!("2024-03-{day:02}"))
            .collect::<Vec<_>>();
        TimeSeries::from_pairs(dates.iter().map(String::as_str).zip(values.iter().copied()))
            .expect("series")
    }

    #[test]
    fn emits_one_beta_per_complete_window() {
        let x = series(&[0.01, -0.02, 0.03, 0.01, -0.01, 0.02, 0.005, -0.015]);
        let y = series(&[0.02, -0.04, 0.06, 0.02, -0.02, 0.04, 0.01, -0.03]);
        let betas = rolling_beta(&x, &y, Window::new(5).expect("window"));

        assert_eq!(betas.len(), 4);
        assert_eq!(betas.dates()[0].format_iso(), "2024-03-05");
        assert_eq!(betas.dates()[3].format_iso(), "2024-03-08");
        for beta in betas.values() {
            assert!((beta.unwrap_or(0.0) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn short_input_yields_empty_series() {
        let x = series(&[0.01, 0.02]);
        let y = series(&[0.02, 0.04]);
        assert!(rolling_beta(&x, &y, Window::new(3).expect("window")).is_empty());
    }

    #[test]
    fn degenerate_window_yields_undefined_points() {
        let x = series(&[0.01, 0.02, 0.03]);
        let y = series(&[0.02, 0.04, 0.06]);
        let betas = rolling_beta(&x, &y, Window::new(1).expect("window"));
        assert_eq!(betas.len(), 3);
        assert!(betas.values().iter().all(|beta| beta.is_undefined()));
    }
}
