use pairlab_core::{DateRange, TradingDate};
use time::{Date, Month};

use crate::cli::{Lookback, PeriodArgs};
use crate::error::CliError;

impl Lookback {
    fn months(self) -> Option<i32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::ThreeYears => Some(36),
            Self::Ytd | Self::Max => None,
        }
    }

    /// First date of the lookback ending at `end`; `first` is the earliest
    /// date available.
    pub fn start(self, end: TradingDate, first: TradingDate) -> TradingDate {
        let end_date = end.into_inner();
        let start = match (self, self.months()) {
            (_, Some(months)) => months_before(end_date, months),
            (Self::Ytd, None) => Date::from_calendar_date(end_date.year(), Month::January, 1).ok(),
            _ => None,
        };
        start.map_or(first, TradingDate::from_date).max(first)
    }
}

/// Same day-of-month `months` earlier, clamped to the length of that month.
fn months_before(date: Date, months: i32) -> Option<Date> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months;
    let year = index.div_euclid(12);
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
}

/// Resolve the analysis period from explicit dates, a lookback, or the span
/// of the loaded data, in that order of precedence.
pub fn resolve_period(args: &PeriodArgs, span: &DateRange) -> Result<DateRange, CliError> {
    let end = match &args.end {
        Some(raw) => TradingDate::parse(raw)?,
        None => span.end,
    };
    let start = match (&args.start, args.lookback) {
        (Some(raw), _) => TradingDate::parse(raw)?,
        (None, Some(lookback)) => lookback.start(end, span.start),
        (None, None) => span.start,
    };
    Ok(DateRange::new(start, end)?)
}
