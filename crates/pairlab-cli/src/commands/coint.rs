use pairlab_core::cointegration;
use serde_json::json;

use crate::cli::CointArgs;
use crate::error::CliError;
use crate::output::Table;

use super::{CommandResult, PairInput};

pub fn run(args: &CointArgs) -> Result<CommandResult, CliError> {
    let input = PairInput::load(&args.pair)?;
    let result = cointegration(&input.base_close, &input.alt_close);

    let table = Table::from_records(&[result])?;
    let mut command = CommandResult::ok(
        json!({
            "base": input.base,
            "alt": input.alt,
            "period": input.period,
            "cointegration": result,
        }),
        table,
    )
    .with_warnings(input.warnings);
    if result.p_value.is_undefined() {
        command = command.with_warning("ADF test could not be run on the spread");
    }
    Ok(command)
}
