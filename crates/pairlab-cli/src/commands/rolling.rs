use pairlab_core::{returns, rolling_beta, Estimate, TradingDate};
use serde::Serialize;
use serde_json::json;

use crate::cli::RollingArgs;
use crate::config::PairLabConfig;
use crate::error::CliError;
use crate::output::Table;

use super::{CommandResult, PairInput};

#[derive(Debug, Serialize)]
struct RollingRow {
    date: TradingDate,
    beta: Estimate,
}

pub fn run(args: &RollingArgs, config: &PairLabConfig) -> Result<CommandResult, CliError> {
    let window = config.rolling_window(args.window)?;
    let input = PairInput::load(&args.pair)?;

    let betas = rolling_beta(
        &returns(&input.base_close),
        &returns(&input.alt_close),
        window,
    );
    let rows = betas
        .iter()
        .map(|(date, beta)| RollingRow { date, beta: *beta })
        .collect::<Vec<_>>();

    let mut result = CommandResult::ok(
        json!({
            "base": input.base,
            "alt": input.alt,
            "period": input.period,
            "window": window,
            "points": betas,
        }),
        Table::from_records(&rows)?,
    )
    .with_warnings(input.warnings);
    if betas.is_empty() {
        result = result.with_warning(format!(
            "fewer than {} aligned returns; rolling beta is empty",
            window.get()
        ));
    }
    Ok(result)
}
