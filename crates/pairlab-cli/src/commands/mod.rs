mod beta;
mod coint;
mod hedge;
mod rolling;
mod simulate;
mod summarize;

use pairlab_core::{AlignedPair, DateRange, PriceSeries, Symbol, MIN_REGRESSION_OBSERVATIONS};
use serde_json::Value;

use crate::cli::{Cli, Command, PairArgs, PeriodArgs};
use crate::config::PairLabConfig;
use crate::envelope::{Envelope, EnvelopeError, EnvelopeMeta};
use crate::error::CliError;
use crate::input::{load_price_file, LoadedData};
use crate::output::Table;
use crate::period::resolve_period;

pub struct CommandResult {
    pub data: Value,
    pub table: Table,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value, table: Table) -> Self {
        Self {
            data,
            table,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Envelope plus its tabular view.
pub struct CommandOutput {
    pub envelope: Envelope<Value>,
    pub table: Table,
}

pub fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let config = PairLabConfig::load(cli.config.as_deref())?;

    let result = match &cli.command {
        Command::Summarize(args) => summarize::run(args, &config)?,
        Command::Beta(args) => beta::run(args)?,
        Command::Rolling(args) => rolling::run(args, &config)?,
        Command::Coint(args) => coint::run(args)?,
        Command::Hedge(args) => hedge::run(args, &config)?,
        Command::Simulate(args) => simulate::run(args, &config)?,
    };

    let CommandResult {
        data,
        table,
        warnings,
        errors,
    } = result;
    let meta = EnvelopeMeta::new(warnings)?;

    Ok(CommandOutput {
        envelope: Envelope::new(meta, data, errors),
        table,
    })
}

/// Closes of one base/alt pair restricted to the requested period.
pub struct PairInput {
    pub base: Symbol,
    pub alt: Symbol,
    pub period: DateRange,
    pub base_close: PriceSeries,
    pub alt_close: PriceSeries,
    pub warnings: Vec<String>,
}

impl PairInput {
    pub fn load(args: &PairArgs) -> Result<Self, CliError> {
        let base = Symbol::parse(&args.base)?;
        let alt = Symbol::parse(&args.alt)?;
        let data = load_price_file(&args.data)?;
        let period = data_period(&data, &args.period)?;

        let base_close = data.history(&base)?.close.slice(&period);
        let alt_close = data.history(&alt)?.close.slice(&period);
        let mut warnings = data.warnings;

        let aligned = AlignedPair::intersect(&base_close, &alt_close).len();
        if aligned <= MIN_REGRESSION_OBSERVATIONS {
            warnings.push(format!(
                "{base}/{alt}: only {aligned} common date(s) in period; estimates need {} returns",
                MIN_REGRESSION_OBSERVATIONS
            ));
        }

        Ok(Self {
            base,
            alt,
            period,
            base_close,
            alt_close,
            warnings,
        })
    }
}

fn data_period(data: &LoadedData, args: &PeriodArgs) -> Result<DateRange, CliError> {
    let span = data.span.ok_or_else(|| CliError::EmptyData {
        path: data.path.clone(),
    })?;
    resolve_period(args, &span)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pairlab_core::HedgeMethod;
    use tempfile::NamedTempFile;

    use super::*;

    fn scenario_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        let base = [100.0, 101.0, 99.0, 103.0, 104.0, 102.0];
        let alt = [50.0, 52.0, 48.0, 55.0, 56.0, 53.0];
        writeln!(file, "date,symbol,close,volume").expect("write");
        for (day, (base, alt)) in base.iter().zip(alt).enumerate() {
            writeln!(file, "2024-01-{:02},SPY,{base},1000", day + 2).expect("write");
            writeln!(file, "2024-01-{:02},SSO,{alt},500", day + 2).expect("write");
        }
        file
    }

    fn run_args(args: &[&str]) -> Result<CommandOutput, CliError> {
        let cli = Cli::try_parse_from(args).expect("parse");
        run(&cli)
    }

    #[test]
    fn beta_reports_every_method_by_default() {
        let file = scenario_file();
        let path = file.path().to_str().expect("utf-8 path");

        let output =
            run_args(&["pairlab", "beta", "--data", path, "--base", "spy", "--alt", "SSO"])
                .expect("beta");

        let estimates = output.envelope.data["estimates"].as_array().expect("array");
        assert_eq!(estimates.len(), HedgeMethod::ALL.len());
        assert_eq!(output.table.rows().len(), HedgeMethod::ALL.len());
        assert_eq!(estimates[0]["method"], "ols");
        assert!(output.envelope.meta.warnings.is_empty());
    }

    #[test]
    fn summarize_explicit_pair_uses_the_whole_file() {
        let file = scenario_file();
        let path = file.path().to_str().expect("utf-8 path");

        let output = run_args(&["pairlab", "summarize", "--data", path, "--pair", "SPY:SSO:2"])
            .expect("summarize");

        let row = &output.envelope.data["metrics"][0];
        assert_eq!(row["pair"], "SPY->SSO");
        assert_eq!(row["n_obs"], 5);
        let deviation = row["target_deviation"].as_f64().expect("defined");
        assert!((deviation - 1.4852).abs() < 1e-3);
    }

    #[test]
    fn summarize_warns_for_instruments_missing_from_the_file() {
        let file = scenario_file();
        let path = file.path().to_str().expect("utf-8 path");

        let output = run_args(&["pairlab", "summarize", "--data", path, "--pair", "SPY:UPRO:3"])
            .expect("summarize");

        assert!(output.envelope.data["metrics"][0]["beta_alt_on_base"].is_null());
        assert!(output
            .envelope
            .meta
            .warnings
            .iter()
            .any(|warning| warning.starts_with("UPRO")));
    }

    #[test]
    fn single_pair_command_requires_both_instruments() {
        let file = scenario_file();
        let path = file.path().to_str().expect("utf-8 path");

        let error = run_args(&["pairlab", "coint", "--data", path, "--base", "SPY", "--alt", "TQQQ"])
            .err()
            .expect("missing instrument");
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn undefined_hedge_is_reported_as_envelope_error() {
        let output = run_args(&[
            "pairlab",
            "hedge",
            "--qty-alt",
            "100",
            "--price-alt",
            "50",
            "--price-base",
            "0",
            "--beta",
            "2",
        ])
        .expect("hedge");

        assert_eq!(output.envelope.errors.len(), 1);
        assert_eq!(output.envelope.errors[0].code, "hedge_undefined");
        assert!(output.envelope.data["sizing"].is_null());
    }

    #[test]
    fn short_history_rolling_beta_is_empty_with_warnings() {
        let file = scenario_file();
        let path = file.path().to_str().expect("utf-8 path");

        let output = run_args(&[
            "pairlab", "rolling", "--data", path, "--base", "SPY", "--alt", "SSO", "--window", "20",
        ])
        .expect("rolling");

        assert!(output.table.is_empty());
        assert!(output
            .envelope
            .meta
            .warnings
            .iter()
            .any(|warning| warning.contains("rolling beta is empty")));
    }
}
