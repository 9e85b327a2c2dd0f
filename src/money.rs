//! Integer-cent currency values.
//!
//! Amounts are stored as whole numbers of cents so that sums over the
//! transaction collection stay exact. Rounding to two decimal places only
//! happens when an amount is formatted for display.

use std::{
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A currency value as a whole number of cents.
///
/// May be negative: balances are amounts too.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero dollars and zero cents.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The number of cents in this amount.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether this amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// The amount in dollars, for chart data and display formatting.
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a dollar amount such as `"12.34"`, `"12.3"` or `"12"`.
    ///
    /// Signs are rejected: form inputs only submit unsigned amounts, and
    /// whether money came in or went out is recorded separately.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `text` is not a number with at most
    /// two decimal places.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let trimmed = text.trim();
        let invalid = || Error::InvalidAmount(text.to_owned());

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        if fraction.len() > 2 {
            return Err(invalid());
        }

        // Only bare digits: integer parsing would accept a leading sign.
        if !trimmed.bytes().all(|byte| byte.is_ascii_digit() || byte == b'.') {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse::<u32>().map_err(|_| invalid())?.into()
        };

        let cents: i64 = if fraction.is_empty() {
            0
        } else {
            let cents: i64 = fraction.parse::<u8>().map_err(|_| invalid())?.into();
            if fraction.len() == 1 { cents * 10 } else { cents }
        };

        Ok(Self(dollars * 100 + cents))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}
