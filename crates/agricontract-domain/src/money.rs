use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Money in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);
    /// Largest amount the marketplace accepts anywhere, one trillion dollars.
    pub const MAX: Self = Self(100_000_000_000_000);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_whole(units: u64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Saturates at [`Amount::MAX`]. Use [`Amount::checked_times`] on user input.
    pub fn times(self, quantity: u32) -> Self {
        self.checked_times(quantity).unwrap_or(Self::MAX)
    }

    /// `None` when the product exceeds [`Amount::MAX`].
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0
            .checked_mul(u64::from(quantity))
            .filter(|cents| *cents <= Self::MAX.0)
            .map(Self)
    }

    /// Integer percentage, rounded half up to the nearest cent.
    pub fn percent(self, percent: u64) -> Self {
        let cents = (u128::from(self.0) * u128::from(percent) + 50) / 100;
        Self(u64::try_from(cents).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let cents = self.0 % 100;
        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if cents == 0 {
            write!(f, "${grouped}")
        } else {
            write!(f, "${grouped}.{cents:02}")
        }
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidAmount {
            field: "amount",
            value: raw.to_owned(),
        };
        let trimmed = raw.trim().trim_start_matches('$').replace(',', "");
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed.as_str(), ""),
        };
        if whole.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        let whole = whole.parse::<u64>().map_err(|_| invalid())?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };
        let amount = whole
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .ok_or_else(invalid)?;
        if amount == 0 || amount > Self::MAX.0 {
            return Err(invalid());
        }
        Ok(Self(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_thousands_separators() {
        assert_eq!(Amount::from_whole(4500).to_string(), "$4,500");
        assert_eq!(Amount::from_whole(1_234_567).to_string(), "$1,234,567");
        assert_eq!(Amount::from_cents(2_250_50).to_string(), "$2,250.50");
        assert_eq!(Amount::from_whole(45).to_string(), "$45");
    }

    #[test]
    fn multiplies_and_takes_percentages() {
        let unit = Amount::from_whole(45);
        assert_eq!(unit.times(100), Amount::from_whole(4500));
        assert_eq!(Amount::from_whole(4500).percent(50), Amount::from_whole(2250));
        assert_eq!(Amount::from_cents(3).percent(50), Amount::from_cents(2));
    }

    #[test]
    fn parses_user_entered_amounts() {
        assert_eq!("45".parse::<Amount>(), Ok(Amount::from_whole(45)));
        assert_eq!("$1,200.5".parse::<Amount>(), Ok(Amount::from_cents(120_050)));
        assert!("".parse::<Amount>().is_err());
        assert!("0".parse::<Amount>().is_err());
        assert!("12.345".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
        assert!("1000000000000".parse::<Amount>().is_ok());
        assert!("1000000000000.01".parse::<Amount>().is_err());
        assert!("184467440737095516".parse::<Amount>().is_err());
    }

    #[test]
    fn oversized_products_are_refused_and_percentages_never_overflow() {
        let price = Amount::from_whole(1_000_000);
        assert_eq!(price.checked_times(1_000_000), Some(Amount::MAX));
        assert_eq!(price.checked_times(1_000_001), None);
        assert_eq!(price.times(u32::MAX), Amount::MAX);
        assert_eq!(Amount::from_cents(u64::MAX).percent(50), Amount::from_cents(u64::MAX / 2 + 1));
        assert_eq!(Amount::MAX.percent(50), Amount::from_whole(500_000_000_000));
    }
}
