use pairlab_core::{estimate_hedge_ratio, Estimate, HedgeMethod, HedgeRatio};
use serde::Serialize;
use serde_json::json;

use crate::cli::BetaArgs;
use crate::error::CliError;
use crate::output::Table;

use super::{CommandResult, PairInput};

#[derive(Debug, Serialize)]
struct BetaRow {
    method: HedgeMethod,
    beta: Estimate,
    adf_stat: Estimate,
    p_value: Estimate,
}

impl From<&HedgeRatio> for BetaRow {
    fn from(ratio: &HedgeRatio) -> Self {
        let diagnosis = ratio.cointegration.unwrap_or_default();
        Self {
            method: ratio.method,
            beta: ratio.beta,
            adf_stat: diagnosis.adf_stat,
            p_value: diagnosis.p_value,
        }
    }
}

pub fn run(args: &BetaArgs) -> Result<CommandResult, CliError> {
    let input = PairInput::load(&args.pair)?;
    let methods = if args.methods.is_empty() {
        HedgeMethod::ALL.to_vec()
    } else {
        args.methods.clone()
    };

    let estimates = methods
        .into_iter()
        .map(|method| estimate_hedge_ratio(method, &input.base_close, &input.alt_close))
        .collect::<Vec<_>>();
    let rows = estimates.iter().map(BetaRow::from).collect::<Vec<_>>();

    let data = json!({
        "base": input.base,
        "alt": input.alt,
        "period": input.period,
        "estimates": estimates,
    });
    Ok(CommandResult::ok(data, Table::from_records(&rows)?).with_warnings(input.warnings))
}
