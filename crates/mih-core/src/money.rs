//! # Money Module
//!
//! Provides the `Money` type for euro amounts and `Rate` for percentages.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a quote in floats:                                             │
//! │    6.5 €/m² × 18 + 0.1 + 0.2 ... drifts by fractions of a cent          │
//! │    and round(TTC × 50%) + (TTC - acompte) can miss TTC by 0,01 €        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every tariff is a whole number of cents (6,50 € = 650)              │
//! │    quantity × unit price and every sum are exact                       │
//! │    Only TVA and acompte are rounded, once each                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The front end and the PDF assembler speak decimal euro numbers
//! (`"prixUnitaire": 6.5`). `Money` serializes to and from that form and
//! converts to cents exactly once, at the boundary.
//!
//! ## Usage
//! ```rust
//! use mih_core::money::{Money, Rate};
//!
//! let velum = Money::from_cents(1500);          // 15,00 € / m²
//! let line = velum.checked_mul_quantity(12).unwrap();
//! assert_eq!(line.cents(), 18_000);
//!
//! let tva = line.checked_apply_rate(Rate::from_bps(2000)).unwrap();
//! assert_eq!(tva.cents(), 3_600);
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A euro amount stored as a whole number of cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Checked multiplication**: quantities come from user input, so
///   `quantity × unit price` is computed with overflow detection
///
/// ## Where Money Flows
/// ```text
/// PriceTable ──► PdfPrestation.prixUnitaire ──► PdfPrestation.total
///                                                     │
///                                   PdfSection.total ◄┘
///                                         │
///     PdfFinancialData: totalHT ─► tva ─► totalTTC ─► acompte / solde
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::money::Money;
    ///
    /// let moquette = Money::from_cents(650); // 6,50 €
    /// assert_eq!(moquette.cents(), 650);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole euros.
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::money::Money;
    ///
    /// assert_eq!(Money::from_euros(270).cents(), 27_000);
    /// ```
    #[inline]
    pub const fn from_euros(euros: i64) -> Self {
        Money(euros * 100)
    }

    /// Converts a decimal euro amount to cents, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    pub fn try_from_euros_f64(euros: f64) -> Option<Self> {
        if !euros.is_finite() {
            return None;
        }

        let cents = (euros * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cent portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a decimal euro number (wire/display only).
    #[inline]
    pub fn to_euros_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero euros.
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::money::Money;
    ///
    /// let chaise = Money::from_euros(40);
    /// assert_eq!(chaise.checked_mul_quantity(3), Some(Money::from_euros(120)));
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(qty)).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts `other`, `None` on overflow.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Applies a rate and rounds half away from zero to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount × bps ± 5000) / 10000`.
    /// The ±5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::money::{Money, Rate};
    ///
    /// // 12,35 € × 20 % = 2,47 €
    /// let tva = Money::from_cents(1235).checked_apply_rate(Rate::from_bps(2000));
    /// assert_eq!(tva, Some(Money::from_cents(247)));
    ///
    /// // 0,05 € × 50 % = 0,025 € → 0,03 €
    /// let acompte = Money::from_cents(5).checked_apply_rate(Rate::from_bps(5000));
    /// assert_eq!(acompte, Some(Money::from_cents(3)));
    /// ```
    pub fn checked_apply_rate(&self, rate: Rate) -> Option<Self> {
        let product = self.0 as i128 * rate.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        i64::try_from(rounded).ok().map(Money)
    }

    /// Formats the amount the way the French quote shows it: `1 234,56`.
    ///
    /// The thousands separator is U+202F (narrow no-break space), as
    /// produced by `Intl.NumberFormat('fr-FR')` on the front end.
    pub fn format_fr(&self) -> String {
        self.format_with_grouping(Some('\u{202f}'))
    }

    /// Decimal comma without thousands grouping: `1234,56`.
    ///
    /// This is what the contract form fields hold.
    pub fn format_plain_fr(&self) -> String {
        self.format_with_grouping(None)
    }

    fn format_with_grouping(&self, separator: Option<char>) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.euros().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
        for (i, ch) in digits.chars().enumerate() {
            if let Some(separator) = separator {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(separator);
                }
            }
            grouped.push(ch);
        }

        format!("{}{},{:02}", sign, grouped, self.cents_part())
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so TVA at 20 % is 2000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as on the printed quote: `1 234,56 €`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} €", self.format_fr())
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Serialized as a decimal euro number, e.g. `6.5`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_euros_f64())
    }
}

/// Accepts integer or decimal euro numbers and rounds to the cent.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let euros = f64::deserialize(deserializer)?;
        Money::try_from_euros_f64(euros)
            .ok_or_else(|| de::Error::custom(format!("invalid euro amount: {euros}")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.euros(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display_uses_french_format() {
        assert_eq!(Money::from_cents(650).to_string(), "6,50 €");
        assert_eq!(Money::from_cents(0).to_string(), "0,00 €");
        assert_eq!(Money::from_euros(5_328).to_string(), "5\u{202f}328,00 €");
        assert_eq!(
            Money::from_cents(123_456_789).to_string(),
            "1\u{202f}234\u{202f}567,89 €"
        );
        assert_eq!(Money::from_cents(-550).to_string(), "-5,50 €");
    }

    #[test]
    fn test_plain_format_has_no_grouping() {
        assert_eq!(Money::from_cents(123_456).format_plain_fr(), "1234,56");
        assert_eq!(Money::from_euros(185).format_plain_fr(), "185,00");
        assert_eq!(Money::zero().format_plain_fr(), "0,00");
    }

    #[test]
    fn test_checked_sub_overflow() {
        assert_eq!(
            Money::from_euros(5_045).checked_sub(Money::from_euros(5_000)),
            Some(Money::from_euros(45))
        );
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_sub(Money::from_cents(-1)), None);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_mul_quantity_overflow() {
        assert_eq!(
            Money::from_cents(650).checked_mul_quantity(18),
            Some(Money::from_cents(11_700))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        let tva = Rate::from_bps(2000);
        // 0,03 € × 20 % = 0,006 € → 0,01 €
        assert_eq!(Money::from_cents(3).checked_apply_rate(tva), Some(Money::from_cents(1)));
        // 0,02 € × 20 % = 0,004 € → 0,00 €
        assert_eq!(Money::from_cents(2).checked_apply_rate(tva), Some(Money::zero()));
        assert_eq!(
            Money::from_cents(-5).checked_apply_rate(Rate::from_bps(5000)),
            Some(Money::from_cents(-3))
        );
    }

    #[test]
    fn test_serde_euro_numbers() {
        let json = serde_json::to_string(&Money::from_cents(650)).unwrap();
        assert_eq!(json, "6.5");

        let from_int: Money = serde_json::from_str("270").unwrap();
        assert_eq!(from_int, Money::from_euros(270));

        let from_float: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(from_float.cents(), 10);
    }

    #[test]
    fn test_try_from_euros_rejects_non_finite() {
        assert_eq!(Money::try_from_euros_f64(f64::NAN), None);
        assert_eq!(Money::try_from_euros_f64(f64::INFINITY), None);
        assert_eq!(Money::try_from_euros_f64(1e300), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_rate_percentage() {
        let rate = Rate::from_bps(2000);
        assert_eq!(rate.bps(), 2000);
        assert!((rate.percentage() - 20.0).abs() < 0.001);
    }
}
