//! # Money Module
//!
//! Currency formatting used on every payroll screen.
//!
//! ## Display Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HOW AMOUNTS ARE SHOWN                                                  │
//! │                                                                         │
//! │  format_currency_magnitude(-1000.4)  →  "1,000"   (never a sign)        │
//! │                                                                         │
//! │  Basic salary     ৳10,000                                               │
//! │  Bonuses         +৳500        ← caller prepends "+"                     │
//! │  Deductions      -৳200        ← caller prepends "-"                     │
//! │  Final            ৳10,300                                               │
//! │                                                                         │
//! │  Only format_currency adds a sign, and only for negative values.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oshud_core::money::{format_currency, format_currency_magnitude, CURRENCY_SYMBOL};
//!
//! assert_eq!(format_currency_magnitude(1234567.0), "1,234,567");
//! assert_eq!(format_currency(-1000.0, CURRENCY_SYMBOL), "-৳1,000");
//! ```

use crate::payroll::{to_safe_number, NumericInput};

/// Bangladeshi taka sign used as the display prefix.
pub const CURRENCY_SYMBOL: &str = "৳";

// =============================================================================
// Formatting
// =============================================================================

/// Formats the magnitude of an amount as a grouped integer.
///
/// The input is sanitized first, then the absolute value is rounded half
/// away from zero and grouped in thousands with commas. No sign is emitted.
///
/// ## Example
/// ```rust
/// use oshud_core::money::format_currency_magnitude;
///
/// assert_eq!(format_currency_magnitude(-1000.0), "1,000");
/// assert_eq!(format_currency_magnitude("abc"), "0");
/// assert_eq!(format_currency_magnitude(999.5), "1,000");
/// ```
pub fn format_currency_magnitude(amount: impl NumericInput) -> String {
    let magnitude = to_safe_number(amount).abs().round();
    group_thousands(&format!("{:.0}", magnitude))
}

/// Formats an amount with its symbol: `৳10,300`, or `-৳1,000` when the
/// amount rounds below zero.
///
/// `-0.4` rounds to zero and is shown unsigned.
///
/// ## Example
/// ```rust
/// use oshud_core::money::format_currency;
///
/// assert_eq!(format_currency(10_300.0, "৳"), "৳10,300");
/// assert_eq!(format_currency(-1_000.0, "Tk "), "-Tk 1,000");
/// ```
pub fn format_currency(amount: impl NumericInput, symbol: &str) -> String {
    let amount = to_safe_number(amount);
    let sign = if amount.round() < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, format_currency_magnitude(amount))
}

/// Inserts a comma between every group of three digits, from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_magnitude_drops_sign() {
        assert_eq!(format_currency_magnitude(-1000.0), "1,000");
        assert_eq!(format_currency_magnitude(1000.0), "1,000");
        assert_eq!(format_currency_magnitude(-0.4), "0");
    }

    #[test]
    fn test_format_magnitude_rounds_half_away_from_zero() {
        assert_eq!(format_currency_magnitude(2.5), "3");
        assert_eq!(format_currency_magnitude(-2.5), "3");
        assert_eq!(format_currency_magnitude(1234.49), "1,234");
    }

    #[test]
    fn test_format_magnitude_sanitizes() {
        assert_eq!(format_currency_magnitude(f64::NAN), "0");
        assert_eq!(format_currency_magnitude("oops"), "0");
        assert_eq!(format_currency_magnitude(None::<f64>), "0");
    }

    #[test]
    fn test_format_currency_sign() {
        assert_eq!(format_currency(10_300.0, CURRENCY_SYMBOL), "৳10,300");
        assert_eq!(format_currency(-1_000.0, CURRENCY_SYMBOL), "-৳1,000");
        assert_eq!(format_currency(-0.2, CURRENCY_SYMBOL), "৳0");
        assert_eq!(format_currency(f64::NAN, CURRENCY_SYMBOL), "৳0");
    }
}
