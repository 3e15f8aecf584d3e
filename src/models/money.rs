//! Money type for representing currency amounts
//!
//! Amounts are whole currency units (won) stored as i64. There is no minor
//! unit, so every amount is exact. Formatting follows the ko-KR convention of
//! comma thousands separators and a trailing `원`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::transaction::TransactionType;

/// Default suffix appended by `Display`
pub const DEFAULT_CURRENCY_SUFFIX: &str = "원";

/// Largest amount a single transaction may carry (one trillion won)
pub const MAX_TRANSACTION_AMOUNT: Money = Money(1_000_000_000_000);

/// A monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use cloudpocket::models::Money;
    /// let amount = Money::new(15000);
    /// assert_eq!(amount.value(), 15000);
    /// ```
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "15000", "15,000", "15,000원", "-500"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let rest = rest.strip_suffix(DEFAULT_CURRENCY_SUFFIX).unwrap_or(rest).trim();
        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let units: i64 = digits
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -units } else { units }))
    }

    /// Format with thousands separators and the given suffix, e.g. `1,234,000원`
    pub fn format_with_suffix(&self, suffix: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, group_digits(self.0.unsigned_abs()), suffix)
    }

    /// Format as a transaction amount: `+` for income, `-` for expense
    pub fn format_signed(&self, kind: TransactionType, suffix: &str) -> String {
        let sign = match kind {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        format!("{}{}{}", sign, group_digits(self.0.unsigned_abs()), suffix)
    }

    /// Format as a balance: `+` when zero or positive, `-` when negative
    pub fn format_balance(&self, suffix: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "+" };
        format!("{}{}{}", sign, group_digits(self.0.unsigned_abs()), suffix)
    }
}

/// Insert comma separators every three digits
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_suffix(DEFAULT_CURRENCY_SUFFIX))
    }
}

// Totals clamp at the i64 bounds instead of wrapping or panicking.

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
