use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A non-negative amount of money, held as whole pence so that sums stay
/// exact. Rounding to two fractional digits happens only in `Display`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_pence(pence: u64) -> Self {
        Price(pence)
    }

    pub fn pence(self) -> u64 {
        self.0
    }
}

impl Add for Price {
    type Output = Price;
    fn add(self, other: Price) -> Price {
        Price(self.0 + other.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, other: Price) {
        self.0 += other.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn displays_two_fractional_digits() {
        assert_eq!(Price::from_pence(875).to_string(), "8.75");
        assert_eq!(Price::from_pence(400).to_string(), "4.00");
        assert_eq!(Price::from_pence(5).to_string(), "0.05");
    }

    #[test]
    fn sums_are_exact() {
        let total: Price = vec![Price::from_pence(550), Price::from_pence(325)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_pence(875));
    }

    #[test]
    fn serializes_as_pence() {
        let json = serde_json::to_string(&Price::from_pence(1095)).expect("to_string");
        assert_eq!(json, "1095");
    }
}
