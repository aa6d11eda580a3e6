use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// decimal places kept on every stored amount (paisa / cents)
pub const MONEY_SCALE: u32 = 2;

/// Money type with 2 decimal places precision, rounded half away from zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(Decimal);

fn round_half_up(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(round_half_up(d, MONEY_SCALE))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount (rupees, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (paisa, cents, etc)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, MONEY_SCALE))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places, halves away from zero
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(round_half_up(self.0, dp.min(MONEY_SCALE)))
    }

    /// share of this amount for one of `parts` equal periods, rounded to `dp` places
    ///
    /// Returns the amount unchanged when `parts` is zero.
    pub fn split(&self, parts: u32, dp: u32) -> Self {
        if parts == 0 {
            return *self;
        }
        Money(round_half_up(self.0 / Decimal::from(parts), dp.min(MONEY_SCALE)))
    }

    /// multiply by a whole count
    pub fn times(&self, count: u32) -> Self {
        Money::from_decimal(self.0 * Decimal::from(count))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// check if strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_decimal(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_decimal(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        *self = *self - other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.125").unwrap();
        assert_eq!(m.to_string(), "100.13"); // half away from zero at 2 places

        let paisa = Money::from_minor(150);
        assert_eq!(paisa, Money::from_decimal(dec!(1.50)));
    }

    #[test]
    fn test_split_rounds_half_up() {
        // 5 / 2 = 2.5 -> 3 at whole-unit scale
        assert_eq!(Money::from_major(5).split(2, 0), Money::from_major(3));
        // 100 / 3 = 33.33.. -> 33
        assert_eq!(Money::from_major(100).split(3, 0), Money::from_major(33));
        // kept at paisa scale
        assert_eq!(Money::from_major(100).split(3, 2), Money::from_decimal(dec!(33.33)));
        // zero parts leaves the amount alone
        assert_eq!(Money::from_major(7).split(0, 0), Money::from_major(7));
    }

    #[test]
    fn test_sign_checks() {
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert!(Money::from_major(1).is_positive());
        assert!(Money::from_major(-1).is_negative());
    }

    #[test]
    fn test_sum_and_times() {
        let lines = vec![Money::from_major(85_000); 10];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_major(850_000));
        assert_eq!(Money::from_major(85_000).times(10), total);
    }
}
