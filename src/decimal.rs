//! Monetary amounts and the ledger's numeric-locale contract.
//!
//! Ledger values are written with `,` as the decimal separator and no
//! grouping separators (`1234,56`). Amounts are held as `rust_decimal`
//! values so that sums over a ledger are exact.
//!
//! A single ledger value is bounded by [`Money::MAX_VALUE`] and
//! [`Money::MAX_FRACTION_DIGITS`]. With those bounds, totals and the
//! percentages derived from them stay far inside `Decimal`'s 96-bit range
//! for any ledger that fits in memory.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount.
///
/// Arithmetic keeps full precision; [`fmt::Display`] renders exactly two
/// decimal places, rounding midpoints away from zero.
///
/// # Examples
///
/// ```
/// use ledger_analyzer::Money;
///
/// let amount = Money::from_localized("1000,5").unwrap();
/// assert_eq!(amount.to_string(), "1000.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Number of decimal places used when displaying an amount.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Largest magnitude accepted for a single ledger value (10^15).
    pub const MAX_VALUE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

    /// Most significant fractional digits accepted for a single ledger value.
    pub const MAX_FRACTION_DIGITS: u32 = 4;

    /// Wraps a `Decimal` without changing its scale.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Parses a comma-decimal string such as `"1234,56"`.
    ///
    /// Every `,` is replaced by `.` before parsing, so a value that also
    /// carries grouping separators (`"1.234,56"`) ends up with two points and
    /// is rejected rather than silently read with the wrong magnitude.
    pub fn from_localized(raw: &str) -> std::result::Result<Self, rust_decimal::Error> {
        let normalized = raw.trim().replace(',', ".");
        normalized.parse()
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Checks the per-value bounds, returning a description of the first
    /// one violated.
    pub fn check_bounds(&self) -> std::result::Result<(), String> {
        if self.0.abs() > Self::MAX_VALUE {
            return Err(format!("magnitude exceeds {}", Self::MAX_VALUE));
        }
        if self.0.normalize().scale() > Self::MAX_FRACTION_DIGITS {
            return Err(format!(
                "more than {} fractional digits",
                Self::MAX_FRACTION_DIGITS
            ));
        }
        Ok(())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    /// Parses a plain `.`-decimal string. Only ASCII digits, one optional
    /// leading sign and the decimal point are accepted.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(rust_decimal::Error::ErrorString(format!(
                "Invalid decimal: {:?}",
                trimmed
            )));
        }
        Ok(Money(Decimal::from_str(trimmed)?))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        // Avoid printing "-0.00" for amounts that round to zero.
        let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
        write!(f, "{:.2}", rounded)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

/// A ratio expressed in percent or days, e.g. ROI or average gap.
///
/// Displays with two decimals, rounding midpoints away from zero like
/// [`Money`], and serializes as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Ratio(Decimal);

impl Ratio {
    /// Decimal places kept when a ratio is computed or displayed.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Ratio(Decimal::ZERO);

    /// Rounds `value` to [`Ratio::SCALE`] places, midpoints away from zero.
    pub fn new(value: Decimal) -> Self {
        Ratio(value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// `part / whole * 100`; zero when `whole` is zero.
    pub fn percent(part: Decimal, whole: Decimal) -> Self {
        if whole.is_zero() {
            return Ratio::ZERO;
        }
        Ratio::new((part / whole).saturating_mul(Decimal::ONE_HUNDRED))
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
        write!(f, "{:.2}", rounded)
    }
}

impl Serialize for Ratio {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}
