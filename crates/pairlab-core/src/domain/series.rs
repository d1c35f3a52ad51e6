use std::cmp::Ordering;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::{DateRange, Estimate, TradingDate, ValidationError};

/// Date-indexed sequence with strictly ascending, unique dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T = f64> {
    dates: Vec<TradingDate>,
    values: Vec<T>,
}

/// Daily closing prices of one instrument.
pub type PriceSeries = TimeSeries<f64>;
/// Daily traded volume of one instrument.
pub type VolumeSeries = TimeSeries<f64>;
/// Period-over-period fractional changes.
pub type ReturnSeries = TimeSeries<f64>;
/// Per-window beta estimates indexed by the last date of each window.
pub type RollingBetaSeries = TimeSeries<Estimate>;

impl<T> TimeSeries<T> {
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from parallel vectors already in strictly ascending date order.
    pub(crate) fn from_sorted(dates: Vec<TradingDate>, values: Vec<T>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        debug_assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[TradingDate] {
        &self.dates
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (TradingDate, &T)> + '_ {
        self.dates.iter().copied().zip(self.values.iter())
    }

    pub fn first(&self) -> Option<(TradingDate, &T)> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<(TradingDate, &T)> {
        Some((*self.dates.last()?, self.values.last()?))
    }

    /// Index of `date` in the series, if observed.
    pub fn position(&self, date: TradingDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    pub fn get(&self, date: TradingDate) -> Option<&T> {
        self.position(date).map(|index| &self.values[index])
    }
}

impl<T: Clone> TimeSeries<T> {
    /// Observations whose date falls inside `range` (inclusive).
    pub fn slice(&self, range: &DateRange) -> Self {
        let start = self.dates.partition_point(|date| *date < range.start);
        let end = self.dates.partition_point(|date| *date <= range.end);
        Self::from_sorted(
            self.dates[start..end].to_vec(),
            self.values[start..end].to_vec(),
        )
    }
}

impl TimeSeries<f64> {
    /// Build a series from unordered observations.
    ///
    /// Non-finite values are gaps and are dropped, never interpolated. Two
    /// observations on the same date are rejected.
    pub fn from_observations(
        observations: impl IntoIterator<Item = (TradingDate, f64)>,
    ) -> Result<Self, ValidationError> {
        let mut points = observations
            .into_iter()
            .filter(|(_, value)| value.is_finite())
            .collect::<Vec<_>>();
        points.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));

        if let Some(pair) = points.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(ValidationError::DuplicateDate {
                date: pair[0].0.format_iso(),
            });
        }

        let (dates, values) = points.into_iter().unzip();
        Ok(Self::from_sorted(dates, values))
    }

    /// Parse `(YYYY-MM-DD, value)` pairs; convenient for fixtures and callers
    /// holding string-keyed data.
    pub fn from_pairs<'a>(
        observations: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, ValidationError> {
        let parsed = observations
            .into_iter()
            .map(|(date, value)| TradingDate::parse(date).map(|date| (date, value)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_observations(parsed)
    }
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Serialize)]
struct SeriesPoint<'a, T> {
    date: TradingDate,
    value: &'a T,
}

impl<T: Serialize> Serialize for TimeSeries<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (date, value) in self.iter() {
            seq.serialize_element(&SeriesPoint { date, value })?;
        }
        seq.end()
    }
}

/// Two series restricted to the intersection of their date indices.
///
/// All pairwise computations consume this type so that no estimator can see
/// misaligned observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedPair {
    dates: Vec<TradingDate>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl AlignedPair {
    /// Merge-join `x` and `y` on their common dates.
    pub fn intersect(x: &TimeSeries<f64>, y: &TimeSeries<f64>) -> Self {
        let capacity = x.len().min(y.len());
        let mut aligned = Self {
            dates: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        };

        let (mut i, mut j) = (0, 0);
        while i < x.len() && j < y.len() {
            match x.dates[i].cmp(&y.dates[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    aligned.dates.push(x.dates[i]);
                    aligned.x.push(x.values[i]);
                    aligned.y.push(y.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        aligned
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[TradingDate] {
        &self.dates
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn x_series(&self) -> TimeSeries<f64> {
        TimeSeries::from_sorted(self.dates.clone(), self.x.clone())
    }

    pub fn y_series(&self) -> TimeSeries<f64> {
        TimeSeries::from_sorted(self.dates.clone(), self.y.clone())
    }
}

/// Positive window length in observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Window(usize);

impl Window {
    pub fn new(observations: usize) -> Result<Self, ValidationError> {
        if observations == 0 {
            return Err(ValidationError::InvalidWindow);
        }
        Ok(Self(observations))
    }

    /// Window constrained to `min..=max`, as the interactive layer enforces.
    pub fn bounded(observations: usize, min: usize, max: usize) -> Result<Self, ValidationError> {
        if !(min..=max).contains(&observations) {
            return Err(ValidationError::WindowOutOfRange {
                value: observations,
                min,
                max,
            });
        }
        Self::new(observations)
    }

    pub fn get(self) -> usize {
        self.0
    }
}
