//! Cost derivation and amount formatting.

use rust_decimal::Decimal;

use crate::calculations::common::{checked_whole_amount, parse_decimal_strict, to_whole_amount};
use crate::calculations::pricing::RateTable;
use crate::models::Package;

/// Estimated cost of `carpet_area` square feet at the package's rate.
///
/// With no package the rate is zero. The product is rounded half-up to a
/// whole amount. A product that does not fit an `i64` gives zero, the same
/// as an area that cannot be priced. Pure: identical inputs always give the
/// identical result.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::{derive_cost, RateTable};
/// use estimator_core::Package;
///
/// let rates = RateTable { premium: dec!(500), ..RateTable::defaults() };
/// assert_eq!(derive_cost(dec!(1000), Some(Package::Premium), &rates), 500_000);
/// assert_eq!(derive_cost(dec!(1000), None, &rates), 0);
/// ```
pub fn derive_cost(
    carpet_area: Decimal,
    package: Option<Package>,
    rates: &RateTable,
) -> i64 {
    let rate = package.map_or(Decimal::ZERO, |p| rates.rate(p));
    carpet_area
        .checked_mul(rate)
        .and_then(checked_whole_amount)
        .unwrap_or(0)
}

/// Same as [`derive_cost`] for the raw carpet area text; unparseable text
/// counts as zero area.
pub fn derive_cost_from_input(
    carpet_area: &str,
    package: Option<Package>,
    rates: &RateTable,
) -> i64 {
    let area = parse_decimal_strict(carpet_area).unwrap_or(Decimal::ZERO);
    derive_cost(area, package, rates)
}

/// Cost of the same area at every tier, for side-by-side comparison.
pub fn package_comparison(
    carpet_area: &str,
    rates: &RateTable,
) -> [(Package, i64); 3] {
    Package::ALL.map(|package| {
        (
            package,
            derive_cost_from_input(carpet_area, Some(package), rates),
        )
    })
}

/// Formats an amount with Indian digit grouping (`12,34,567`).
///
/// # Examples
///
/// ```
/// use estimator_core::calculations::format_indian_grouping;
///
/// assert_eq!(format_indian_grouping(500000), "5,00,000");
/// assert_eq!(format_indian_grouping(999), "999");
/// ```
pub fn format_indian_grouping(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{sign}{},{last_three}", groups.join(","))
}

/// Parses an amount that may carry display formatting (`"₹5,00,000"`).
///
/// Currency sign, thousands separators and whitespace are stripped; a
/// fractional remainder is rounded half-up.
pub fn parse_display_amount(s: &str) -> Option<i64> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != ',' && *c != '₹' && !c.is_whitespace())
        .collect();
    parse_decimal_strict(&cleaned).map(to_whole_amount)
}
