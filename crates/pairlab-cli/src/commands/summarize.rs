use std::cmp::Ordering;

use pairlab_core::{summarize_universe, Estimate, PairMetrics, PairSpec, PairUniverse, Symbol};
use serde::Serialize;
use serde_json::json;

use crate::cli::{SortOrder, SummarizeArgs};
use crate::config::PairLabConfig;
use crate::error::CliError;
use crate::input::load_price_file;
use crate::output::Table;

use super::{data_period, CommandResult};

#[derive(Debug, Serialize)]
struct MetricsRow {
    pair: String,
    #[serde(flatten)]
    metrics: PairMetrics,
    target_deviation: Estimate,
}

pub fn run(args: &SummarizeArgs, config: &PairLabConfig) -> Result<CommandResult, CliError> {
    let universe = select_pairs(args, config)?;
    let data = load_price_file(&args.data)?;
    let period = data_period(&data, &args.period)?;

    let mut warnings = data.warnings.clone();
    warnings.extend(
        universe
            .symbols()
            .into_iter()
            .filter(|symbol| !data.market.contains(symbol))
            .map(|symbol| format!("{symbol}: no price history; its pairs are undefined")),
    );
    if universe.is_empty() {
        warnings.push(String::from("no pairs selected"));
    }

    let mut rows = summarize_universe(universe.pairs(), &data.market, &period)
        .into_iter()
        .map(|metrics| MetricsRow {
            pair: metrics.label(),
            target_deviation: metrics.target_deviation(),
            metrics,
        })
        .collect::<Vec<_>>();
    if args.sort == SortOrder::Deviation {
        rows.sort_by(|lhs, rhs| by_absolute_deviation(lhs.target_deviation, rhs.target_deviation));
    }

    let table = Table::from_records(&rows)?;
    let data = json!({
        "period": period,
        "pairs": rows.len(),
        "metrics": rows,
    });
    Ok(CommandResult::ok(data, table).with_warnings(warnings))
}

/// Explicit `--pair` values win; otherwise the configured universe filtered
/// by the command-line issuer/base filters, or the configured ones when none
/// are given.
fn select_pairs(args: &SummarizeArgs, config: &PairLabConfig) -> Result<PairUniverse, CliError> {
    if !args.pairs.is_empty() {
        let pairs = args
            .pairs
            .iter()
            .map(|raw| PairSpec::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(PairUniverse::new(pairs)?);
    }

    if args.issuers.is_empty() && args.bases.is_empty() {
        return Ok(config.selected_pairs());
    }
    let bases = args
        .bases
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(config.pairs.filter(&args.issuers, &bases))
}

/// Largest absolute deviation first; undefined deviations sort last.
fn by_absolute_deviation(lhs: Estimate, rhs: Estimate) -> Ordering {
    match (lhs.value(), rhs.value()) {
        (Some(lhs), Some(rhs)) => rhs.abs().total_cmp(&lhs.abs()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_order_puts_undefined_last() {
        let mut deviations = vec![
            Estimate::Undefined,
            Estimate::new(0.1),
            Estimate::new(-0.5),
            Estimate::new(0.3),
        ];
        deviations.sort_by(|lhs, rhs| by_absolute_deviation(*lhs, *rhs));
        assert_eq!(
            deviations,
            vec![
                Estimate::new(-0.5),
                Estimate::new(0.3),
                Estimate::new(0.1),
                Estimate::Undefined
            ]
        );
    }
}
