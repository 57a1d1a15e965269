use crate::error::RewardError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Number of decimal places kept for money (cents).
const CENTS: u32 = 2;

/// A non-negative amount of money with cent precision.
///
/// This is a wrapper around `rust_decimal::Decimal` that rounds every value to
/// cents on construction, so arithmetic between amounts never accumulates
/// sub-cent drift.
///
/// Serialized as a decimal string. Deserialization always goes through
/// [`FromStr`], so CSV fields never pass through a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub const ZERO: Self = Self(dec!(0.00));

    /// Creates an amount, rounding to cents with banker's rounding.
    pub fn new(value: Decimal) -> Result<Self, RewardError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RewardError::ValidationError(format!(
                "Monetary amount must not be negative: {}",
                value
            )));
        }
        Ok(Self::cents(value, RoundingStrategy::MidpointNearestEven))
    }

    fn cents(value: Decimal, strategy: RoundingStrategy) -> Self {
        let mut rounded = value.round_dp_with_strategy(CENTS, strategy);
        rounded.rescale(CENTS);
        Self(rounded)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Applies a percentage, rounding the result to cents (banker's rounding).
    pub fn multiply_by(self, percentage: Percentage) -> Self {
        Self::cents(self.0 * percentage.value(), RoundingStrategy::MidpointNearestEven)
    }

    /// Applies a percentage, dropping any fraction of a cent.
    ///
    /// Used when splitting an amount, so the shares never add up to more than
    /// the whole.
    pub fn floor_share(self, percentage: Percentage) -> Self {
        Self::cents(self.0 * percentage.value(), RoundingStrategy::ToZero)
    }

    /// Adds `rhs`, or returns `None` if the sum does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts `rhs`, or returns `None` if the result would be negative.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if rhs.0 > self.0 {
            None
        } else {
            Some(Self(self.0 - rhs.0))
        }
    }
}

impl Default for MonetaryAmount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for MonetaryAmount {
    type Error = RewardError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonetaryAmount> for Decimal {
    fn from(amount: MonetaryAmount) -> Self {
        amount.0
    }
}

impl FromStr for MonetaryAmount {
    type Err = RewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let value = Decimal::from_str(digits).map_err(|e| {
            RewardError::ValidationError(format!("Invalid monetary amount '{}': {}", s, e))
        })?;
        Self::new(value)
    }
}

impl Serialize for MonetaryAmount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonetaryAmount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Add for MonetaryAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for MonetaryAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for MonetaryAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MonetaryAmount> for MonetaryAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fraction between 0% and 100%, stored as a decimal in `[0, 1]`.
///
/// Parses from either `"8%"` or `"0.08"` and always displays in the `"8%"`
/// form, which is also how it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE_HUNDRED: Self = Self(Decimal::ONE);

    pub fn new(value: Decimal) -> Result<Self, RewardError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(RewardError::ValidationError(format!(
                "Percentage must be between 0 and 1: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Builds a percentage from a whole-number form, e.g. `8` for 8%.
    pub fn from_percent(percent: Decimal) -> Result<Self, RewardError> {
        Self::new(percent / Decimal::ONE_HUNDRED)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Percentage {
    type Err = RewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = |e: rust_decimal::Error| {
            RewardError::ValidationError(format!("Invalid percentage '{}': {}", s, e))
        };
        match trimmed.strip_suffix('%') {
            Some(percent) => Self::from_percent(Decimal::from_str(percent.trim()).map_err(invalid)?),
            None => Self::new(Decimal::from_str(trimmed).map_err(invalid)?),
        }
    }
}

impl TryFrom<String> for Percentage {
    type Error = RewardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percentage> for String {
    fn from(percentage: Percentage) -> Self {
        percentage.to_string()
    }
}

impl Serialize for Percentage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}
