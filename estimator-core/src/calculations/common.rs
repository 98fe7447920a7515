//! Common utility functions for estimate calculations.
//!
//! This module provides shared functionality used by the pricing and cost
//! calculations, including rounding and the parsing of user- or
//! company-entered numbers.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Optional sign, integer digits, then an optional `.` with fraction digits.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])?(\d+)?(?:\.(\d+))?").expect("leading number pattern compiles")
});

/// Rounds a decimal value to a whole number using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero, which for the
/// non-negative amounts an estimate deals in means upwards.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1234.49)), dec!(1234));
/// assert_eq!(round_half_up(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_half_up(dec!(-2.5)), dec!(-3)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to a whole number and converts to `i64`, saturating at the bounds.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::common::to_whole_amount;
///
/// assert_eq!(to_whole_amount(dec!(499999.5)), 500000);
/// ```
pub fn to_whole_amount(value: Decimal) -> i64 {
    let rounded = round_half_up(value);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Rounds to a whole number and converts to `i64`; `None` when it does not fit.
pub fn checked_whole_amount(value: Decimal) -> Option<i64> {
    round_half_up(value).to_i64()
}

/// Parses the leading decimal number of a string, ignoring whatever follows.
///
/// Company rates are free text (`"1200"`, `"1200/sq ft"`, `"1,200-1,500"`),
/// so only the numeric prefix counts. Thousands separators are dropped
/// first. Returns `None` when the string does not start with a number.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::common::parse_leading_decimal;
///
/// assert_eq!(parse_leading_decimal("1,200-1,500"), Some(dec!(1200)));
/// assert_eq!(parse_leading_decimal(" .5 lakh"), Some(dec!(0.5)));
/// assert_eq!(parse_leading_decimal("on request"), None);
/// ```
pub fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    let caps = LEADING_NUMBER.captures(&cleaned)?;
    let int_digits = caps.get(2).map_or("", |m| m.as_str());
    let frac_digits = caps.get(3).map_or("", |m| m.as_str());

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let sign = if caps.get(1).is_some_and(|m| m.as_str() == "-") { "-" } else { "" };
    let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
    let number = if frac_digits.is_empty() {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_digits}")
    };

    number.parse().ok()
}

/// Parses a whole string as a decimal number; surrounding whitespace is allowed.
pub fn parse_decimal_strict(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
