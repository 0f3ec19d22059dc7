//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                     │
//! │                                                                 │
//! │  In binary floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                   │
//! │                                                                 │
//! │  OUR SOLUTION: Integer Cents                                    │
//! │    Every amount is an exact count of the smallest unit, so      │
//! │    sums of line totals are exact and the only rounding point    │
//! │    is the percentage discount, which rounds half-up.            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nutshop_core::money::Money;
//!
//! let price = Money::from_major(750);   // 750.00
//! let line = price * 2;                 // 1500.00
//! assert_eq!(line.to_string(), "1500.00");
//!
//! // NEVER construct Money from a float. No such method exists.
//! ```
//!
//! ## Wire Format
//! All monetary fields serialize as fixed two-decimal strings ("630.00"),
//! never as JSON numbers. This matches how the API renders currency.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals are non-negative in practice, but signed math
///   keeps subtraction total and lets intermediate checks stay simple
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **String serde**: the wire format is `"1500.00"`, not `1500.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use nutshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(750).cents(), 75_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Takes a whole percentage of the amount, rounding half-up.
    ///
    /// This is the single rounding boundary in the system: line totals and
    /// their sums are exact in cents, so only the discount needs rounding.
    ///
    /// ## Implementation
    /// Integer math in i128: `(cents * pct + 50) / 100`. The +50 rounds the
    /// half case up, matching decimal ROUND_HALF_UP at two places.
    ///
    /// ## Example
    /// ```rust
    /// use nutshop_core::money::Money;
    ///
    /// let subtotal = Money::from_major(700);
    /// assert_eq!(subtotal.percentage(10), Money::from_major(70));
    ///
    /// // 10% of 0.05 is 0.005, which rounds up to 0.01
    /// assert_eq!(Money::from_cents(5).percentage(10), Money::from_cents(1));
    /// ```
    pub fn percentage(&self, pct: u32) -> Money {
        // i128 prevents overflow on large amounts
        let cents = (self.0 as i128 * pct as i128 + 50) / 100;
        Money::from_cents(cents as i64)
    }
}

/// Renders as a plain fixed two-decimal string: `1500.00`, `-5.50`.
///
/// No currency symbol: the wire format and the UI both expect bare decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

/// Parses the wire format back: `"750"`, `"750.5"`, `"750.00"`.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };
        if major_str.is_empty() || minor_str.len() > 2 {
            return Err(ParseMoneyError);
        }
        let major: i64 = major_str.parse().map_err(|_| ParseMoneyError)?;
        let minor: i64 = if minor_str.is_empty() {
            0
        } else {
            // "5" means 50 cents, "05" means 5 cents
            let parsed: i64 = minor_str.parse().map_err(|_| ParseMoneyError)?;
            if minor_str.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };
        let cents = major * 100 + minor;
        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Error for unparseable money strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoneyError;

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid money literal")
    }
}

impl std::error::Error for ParseMoneyError {}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"a two-decimal money string")
        })
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
