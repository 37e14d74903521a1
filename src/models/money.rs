//! Whole-unit currency amounts.
//!
//! The local currency is tracked without fractional sub-units, so every
//! amount is an exact signed integer. Negative results are ordinary business
//! values: a negative `difference` or `final_balance` signals a surplus or a
//! shortage rather than an error.
//!
//! Entered amounts are capped at [`Money::MAX`] (2^53 - 1). Sums of capped
//! amounts stay exact; operator arithmetic saturates at the `i64` bounds so
//! an oversized snapshot can never panic a read.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// An exact amount of money in whole currency units.
///
/// Serializes as a plain integer. Deserializes from any exact decimal
/// (a JSON number or a numeric string) that has no fractional part, which
/// is how the entry store's `NUMERIC` columns arrive.
///
/// # Example
///
/// ```
/// use shift_ledger::models::Money;
///
/// let revenue = Money::new(1_000_000);
/// let transfer = Money::new(700_000);
/// assert_eq!(revenue - transfer, Money::new(300_000));
///
/// let parsed: Money = serde_json::from_str("\"295000.00\"").unwrap();
/// assert_eq!(parsed, Money::new(295_000));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "i64")]
pub struct Money(i64);

impl Money {
    /// Zero units.
    pub const ZERO: Money = Money(0);

    /// Largest amount a single count, expense or expense total may hold.
    pub const MAX: Money = Money(9_007_199_254_740_991);

    /// Creates an amount from whole currency units.
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Returns the amount in whole currency units.
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is strictly less than zero.
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true if the magnitude is above [`Money::MAX`].
    pub fn exceeds_max(self) -> bool {
        self.0.unsigned_abs() > Self::MAX.0.unsigned_abs()
    }

    /// Adds two amounts, returning `None` on `i64` overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Returns the magnitude of the amount.
    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

/// Adds two amounts.
pub fn add(a: Money, b: Money) -> Money {
    a + b
}

/// Subtracts `b` from `a`. The result may be negative.
pub fn subtract(a: Money, b: Money) -> Money {
    a - b
}

/// Sums a sequence of amounts; an empty sequence sums to zero.
pub fn sum<I>(amounts: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    amounts.into_iter().sum()
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        Decimal::from(money.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if !value.fract().is_zero() {
            return Err(LedgerError::validation(
                "amount",
                format!("{} has fractional sub-units; amounts are whole currency units", value),
            ));
        }

        value
            .trunc()
            .to_i64()
            .map(Money)
            .ok_or_else(|| LedgerError::validation("amount", format!("{} is out of range", value)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
