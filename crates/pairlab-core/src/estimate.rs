//! # Estimate
//!
//! Explicit "undefined value" for every numeric output of the engine.
//!
//! Insufficient data, zero denominators and empty windows never raise; they
//! produce [`Estimate::Undefined`], which then propagates through arithmetic:
//!
//! ```rust
//! use pairlab_core::Estimate;
//!
//! let beta = Estimate::Undefined;
//! assert!((beta * 0.01).is_undefined());
//! assert!((Estimate::from(0.01) / 0.0).is_undefined());
//! assert_eq!(Estimate::from(2.0) * 0.01, Estimate::from(0.02));
//! ```

use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A numeric result that is either a finite value or undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Estimate {
    Defined(f64),
    #[default]
    Undefined,
}

impl Estimate {
    /// Wrap a raw float; NaN and infinities become `Undefined`.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self::Defined(value)
        } else {
            Self::Undefined
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn unwrap_or(self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }

    /// Raw float with NaN standing in for `Undefined`, for plotting layers.
    pub fn to_f64(self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Defined(value) => Self::new(f(value)),
            Self::Undefined => Self::Undefined,
        }
    }

    pub fn and_then(self, f: impl FnOnce(f64) -> Estimate) -> Self {
        match self {
            Self::Defined(value) => f(value),
            Self::Undefined => Self::Undefined,
        }
    }

    /// `Undefined` when the value is exactly zero.
    pub fn non_zero(self) -> Self {
        match self {
            Self::Defined(value) if value == 0.0 => Self::Undefined,
            other => other,
        }
    }

    pub fn sqrt(self) -> Self {
        self.and_then(|value| {
            if value < 0.0 {
                Self::Undefined
            } else {
                Self::new(value.sqrt())
            }
        })
    }

    fn combine(self, rhs: Self, op: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, rhs) {
            (Self::Defined(lhs), Self::Defined(rhs)) => Self::new(op(lhs, rhs)),
            _ => Self::Undefined,
        }
    }
}

impl From<f64> for Estimate {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Estimate {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::new)
    }
}

impl From<Estimate> for Option<f64> {
    fn from(value: Estimate) -> Self {
        value.value()
    }
}

impl Display for Estimate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defined(value) => match f.precision() {
                Some(precision) => write!(f, "{value:.precision$}"),
                None => write!(f, "{value}"),
            },
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

impl Add for Estimate {
    type Output = Estimate;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |lhs, rhs| lhs + rhs)
    }
}

impl Sub for Estimate {
    type Output = Estimate;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |lhs, rhs| lhs - rhs)
    }
}

impl Mul for Estimate {
    type Output = Estimate;

    fn mul(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |lhs, rhs| lhs * rhs)
    }
}

impl Div for Estimate {
    type Output = Estimate;

    fn div(self, rhs: Self) -> Self::Output {
        self.combine(rhs.non_zero(), |lhs, rhs| lhs / rhs)
    }
}

impl Add<f64> for Estimate {
    type Output = Estimate;

    fn add(self, rhs: f64) -> Self::Output {
        self + Estimate::new(rhs)
    }
}

impl Sub<f64> for Estimate {
    type Output = Estimate;

    fn sub(self, rhs: f64) -> Self::Output {
        self - Estimate::new(rhs)
    }
}

impl Mul<f64> for Estimate {
    type Output = Estimate;

    fn mul(self, rhs: f64) -> Self::Output {
        self * Estimate::new(rhs)
    }
}

impl Div<f64> for Estimate {
    type Output = Estimate;

    fn div(self, rhs: f64) -> Self::Output {
        self / Estimate::new(rhs)
    }
}

impl Add<Estimate> for f64 {
    type Output = Estimate;

    fn add(self, rhs: Estimate) -> Self::Output {
        Estimate::new(self) + rhs
    }
}

impl Sub<Estimate> for f64 {
    type Output = Estimate;

    fn sub(self, rhs: Estimate) -> Self::Output {
        Estimate::new(self) - rhs
    }
}

impl Mul<Estimate> for f64 {
    type Output = Estimate;

    fn mul(self, rhs: Estimate) -> Self::Output {
        Estimate::new(self) * rhs
    }
}

impl Div<Estimate> for f64 {
    type Output = Estimate;

    fn div(self, rhs: Estimate) -> Self::Output {
        Estimate::new(self) / rhs
    }
}

impl Neg for Estimate {
    type Output = Estimate;

    fn neg(self) -> Self::Output {
        self.map(|value| -value)
    }
}

impl Serialize for Estimate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Defined(value) => serializer.serialize_f64(*value),
            Self::Undefined => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Estimate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_on_the_left_lifts_into_the_estimate() {
        assert_eq!(1.0 - Estimate::new(0.25), Estimate::Defined(0.75));
        assert_eq!(2.0 + Estimate::new(0.5), Estimate::Defined(2.5));
        assert!((1.0 - Estimate::Undefined).is_undefined());
        assert!((1.0 + Estimate::Undefined).is_undefined());
    }

    #[test]
    fn non_finite_values_are_undefined() {
        assert!(Estimate::new(f64::NAN).is_undefined());
        assert!(Estimate::new(f64::INFINITY).is_undefined());
        assert_eq!(Estimate::new(1.5).value(), Some(1.5));
    }

    #[test]
    fn undefined_propagates_through_arithmetic() {
        let undefined = Estimate::Undefined;
        let one = Estimate::from(1.0);
        assert!((undefined + one).is_undefined());
        assert!((one - undefined).is_undefined());
        assert!((undefined * 3.0).is_undefined());
        assert!((-undefined).is_undefined());
        assert!((0.01 / undefined).is_undefined());
    }

    #[test]
    fn division_by_zero_is_undefined() {
        assert!((Estimate::from(1.0) / 0.0).is_undefined());
        assert!((0.01 / Estimate::from(0.0)).is_undefined());
        assert_eq!(Estimate::from(1.0) / 4.0, Estimate::Defined(0.25));
    }

    #[test]
    fn serializes_undefined_as_null() {
        let json = serde_json::to_string(&vec![Estimate::from(0.5), Estimate::Undefined])
            .expect("serialize");
        assert_eq!(json, "[0.5,null]");

        let parsed: Vec<Estimate> = serde_json::from_str("[null,2.0]").expect("deserialize");
        assert_eq!(parsed, vec![Estimate::Undefined, Estimate::Defined(2.0)]);
    }

    #[test]
    fn display_honors_precision() {
        assert_eq!(format!("{:.2}", Estimate::from(1.23456)), "1.23");
        assert_eq!(format!("{:.2}", Estimate::Undefined), "undefined");
    }
}
