// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-point currency amounts.
//!
//! Amounts are held as a whole number of euro cents so that sums over
//! any number of records are exact. Conversion to a decimal only happens
//! at the presentation boundary (JSON, CSV, prompt text). Arithmetic
//! saturates at the `i64` bounds instead of wrapping.

use crate::error::DomainError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

const CENTS_PER_UNIT: i64 = 100;

/// Largest amount a single record may carry: one billion euros.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// A currency amount in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from a count of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates an amount from whole euros.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not fit in the cent range.
    pub fn from_units(units: i64) -> Result<Self, DomainError> {
        units
            .checked_mul(CENTS_PER_UNIT)
            .map(Self::from_cents)
            .ok_or_else(|| DomainError::InvalidMoney(units.to_string()))
    }

    /// Creates an amount from a floating point decimal, rounding to the
    /// nearest cent.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or is out of range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_decimal_f64(value: f64) -> Result<Self, DomainError> {
        let scaled: f64 = (value * 100.0).round();
        if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
            return Err(DomainError::InvalidMoney(value.to_string()));
        }
        Ok(Self::from_cents(scaled as i64))
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a floating point decimal for wire formats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.cents < 0
    }

    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Whether the magnitude fits under [`MAX_AMOUNT_CENTS`].
    #[must_use]
    pub const fn is_within_record_limit(&self) -> bool {
        self.cents.unsigned_abs() <= MAX_AMOUNT_CENTS.unsigned_abs()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign: &str = if self.cents < 0 { "-" } else { "" };
        let magnitude: u64 = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses decimal text such as `12`, `12.5`, `12,50` or `-3.99`.
    ///
    /// Digits beyond the second decimal place round half away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMoney(s.to_string());

        let trimmed: &str = s.trim();
        let (negative, unsigned): (bool, &str) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction): (&str, &str) = unsigned
            .split_once(['.', ','])
            .unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = fraction.bytes().map(|b| i64::from(b - b'0')).collect();
        let mut fraction_cents: i64 = digits.first().copied().unwrap_or(0) * 10
            + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).is_some_and(|d| *d >= 5) {
            fraction_cents += 1;
        }

        let cents: i64 = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self::from_cents(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents = self.cents.saturating_add(rhs.cents);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_cents(self.cents.saturating_sub(rhs.cents))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal amount as a number or string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Money::from_units(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let units: i64 = i64::try_from(v).map_err(E::custom)?;
        Money::from_units(units).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Money::from_decimal_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<Money>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
