use pairlab_core::{analyze_hedge, HedgeRequest};
use serde_json::json;

use crate::cli::SimulateArgs;
use crate::config::PairLabConfig;
use crate::error::CliError;
use crate::output::Table;

use super::{CommandResult, PairInput};

pub fn run(args: &SimulateArgs, config: &PairLabConfig) -> Result<CommandResult, CliError> {
    let request = HedgeRequest {
        method: args.method,
        window: config.rolling_window(args.window)?,
        qty_alt: args.qty_alt.unwrap_or(config.qty_alt),
    };
    let input = PairInput::load(&args.pair)?;
    let analysis = analyze_hedge(&input.base_close, &input.alt_close, &request);

    let table = Table::from_records(analysis.pnl.rows())?;
    let mut result = CommandResult::ok(
        json!({
            "base": input.base,
            "alt": input.alt,
            "period": input.period,
            "analysis": analysis,
        }),
        table,
    )
    .with_warnings(input.warnings);
    if analysis.sizing.is_none() {
        result = result.with_warning(format!(
            "{} hedge ratio is undefined; P&L was not simulated",
            request.method
        ));
    }
    Ok(result)
}
