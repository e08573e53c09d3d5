use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use thiserror::Error;

/// An amount that does not fit in [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount out of range")]
pub struct AmountOverflow;

/// An exact amount of money in minor units (cents).
///
/// Prices and order totals go through the checked methods. `Add` and `Sum`
/// saturate at the `i64` bounds and are only meant for reporting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> Result<Money, AmountOverflow> {
        self.0.checked_add(rhs.0).map(Money).ok_or(AmountOverflow)
    }

    /// The price of `quantity` units.
    pub fn checked_mul(self, quantity: u32) -> Result<Money, AmountOverflow> {
        self.0
            .checked_mul(i64::from(quantity))
            .map(Money)
            .ok_or(AmountOverflow)
    }

    /// Exact sum, or `AmountOverflow` if any partial sum leaves the `i64` range.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Result<Money, AmountOverflow> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
