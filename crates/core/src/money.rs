//! Fixed-point monetary amounts (two-decimal semantics).

use core::str::FromStr;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A signed monetary amount stored as an integer number of cents.
///
/// Balances and transfer amounts share this type. Arithmetic is checked so
/// that a ledger can refuse an operation instead of wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl ValueObject for Amount {}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest magnitude accepted when parsing (10^13 whole units).
    pub const MAX_CENTS: i64 = 1_000_000_000_000_000;

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Parse a decimal amount and require it to be non-negative.
    pub fn parse_non_negative(s: &str) -> DomainResult<Amount> {
        let amount: Amount = s.parse()?;
        if amount.is_negative() {
            return Err(DomainError::invalid_amount(format!("{s:?} is negative")));
        }
        Ok(amount)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    /// Accepts standard decimal floating-point text and rounds to the nearest
    /// cent. Non-finite values and out-of-range magnitudes are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .parse()
            .map_err(|e| DomainError::invalid_amount(format!("{s:?}: {e}")))?;

        if !value.is_finite() {
            return Err(DomainError::invalid_amount(format!("{s:?} is not finite")));
        }

        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX_CENTS as f64 {
            return Err(DomainError::invalid_amount(format!("{s:?} is out of range")));
        }

        Ok(Self(cents as i64))
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
