use pairlab_core::{hedge_shares, Estimate};
use serde_json::json;

use crate::cli::HedgeArgs;
use crate::config::PairLabConfig;
use crate::envelope::EnvelopeError;
use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

pub fn run(args: &HedgeArgs, config: &PairLabConfig) -> Result<CommandResult, CliError> {
    let qty_alt = args.qty_alt.unwrap_or(config.qty_alt);
    let sizing = hedge_shares(
        qty_alt,
        args.price_alt,
        args.price_base,
        Estimate::new(args.beta),
    );

    let data = json!({
        "qty_alt": qty_alt,
        "price_alt": args.price_alt,
        "price_base": args.price_base,
        "beta": args.beta,
        "sizing": sizing,
    });

    match sizing {
        Some(sizing) => Ok(CommandResult::ok(data, Table::from_records(&[sizing])?)),
        None => Ok(CommandResult::ok(data, Table::default()).with_error(EnvelopeError::new(
            "hedge_undefined",
            "hedge sizing is undefined for a zero base price or non-finite input",
        ))),
    }
}
