use std::{fmt, str::FromStr};

use fixed::types::I64F64;

/// Possible errors to occur while reading an amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("The amount is empty")]
    Empty,
    #[error("The amount `{0}` is not a number")]
    NotANumber(String),
    #[error("The amount `{0}` is too large")]
    OutOfRange(String),
}

/// A money value with exactly two decimal places
///
/// Amounts are kept as a whole number of cents. Parsing accepts plain
/// decimal text and rounds half away from zero on the decimal digits, so
/// `"12.5"` becomes `12.50`, `"0.005"` becomes `0.01` and `"0.00499"`
/// becomes `0.00`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    /// The zero amount
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from a whole number of cents
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Adds two amounts, saturating at the bounds of the cent range
    pub fn saturating_add(self, other: Self) -> Self {
        Self { cents: self.cents.saturating_add(other.cents) }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        let not_a_number = || AmountError::NotANumber(s.to_owned());
        let out_of_range = || AmountError::OutOfRange(s.to_owned());

        let (negative, digits) = match s.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(not_a_number());
        }

        // move the decimal point two places to the right, so rounding to a
        // cent becomes rounding to an integer, and ties stay exact
        let (cents, rest) = fraction.split_at(fraction.len().min(2));
        let shifted = format!(
            "{}{}{:0<2}.{}0",
            if negative { "-" } else { "" },
            whole,
            cents,
            rest,
        );
        let value = match I64F64::overflowing_from_str(&shifted) {
            Ok((value, false)) => value,
            Ok((_, true)) => return Err(out_of_range()),
            Err(_) => return Err(not_a_number()),
        };
        let cents = value
            .checked_round()
            .and_then(|cents| cents.checked_to_num::<i64>())
            .ok_or_else(out_of_range)?;

        Ok(Self { cents })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let cents = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}
