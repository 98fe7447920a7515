//! Rate tables: aggregating company pricing and resolving the active rates.
//!
//! A quote is priced per square foot at the rate of the selected package.
//! Each tier's rate comes from the first source that has one:
//!
//! 1. the company the wizard was opened from, if it declared that tier,
//! 2. the mean of every company's declared rate for the tier,
//! 3. a fixed default (150 / 500 / 1500 for Basic / Premium / Luxury).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimator_core::calculations::{compute_average_rates, resolve_rates};
//! use estimator_core::{CompanyContext, CompanyPricing, Package};
//!
//! let companies = vec![
//!     CompanyPricing {
//!         basic_price_range: Some("1000".to_string()),
//!         premium_price_range: Some("2000".to_string()),
//!         ..Default::default()
//!     },
//!     CompanyPricing {
//!         basic_price_range: Some("1400".to_string()),
//!         premium_price_range: Some("call us".to_string()),
//!         ..Default::default()
//!     },
//! ];
//!
//! let aggregate = compute_average_rates(&companies);
//! assert_eq!(aggregate.rate(Package::Basic), dec!(1200));
//! assert_eq!(aggregate.rate(Package::Premium), dec!(2000));
//! assert_eq!(aggregate.rate(Package::Luxury), dec!(1500)); // no samples
//!
//! let context = CompanyContext {
//!     company_id: "c1".to_string(),
//!     company_name: "Acme".to_string(),
//!     price_data: CompanyPricing {
//!         basic_price_range: Some("200".to_string()),
//!         ..Default::default()
//!     },
//! };
//! let rates = resolve_rates(Some(&context), &aggregate);
//! assert_eq!(rates.rate(Package::Basic), dec!(200));
//! assert_eq!(rates.rate(Package::Premium), dec!(2000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::parse_leading_decimal;
use crate::models::{CompanyContext, CompanyPricing, Package};

/// Rate per square foot for each package tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub basic: Decimal,
    pub premium: Decimal,
    pub luxury: Decimal,
}

impl RateTable {
    pub const DEFAULT_BASIC: Decimal = Decimal::from_parts(150, 0, 0, false, 0);
    pub const DEFAULT_PREMIUM: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
    pub const DEFAULT_LUXURY: Decimal = Decimal::from_parts(1500, 0, 0, false, 0);

    /// The hardcoded fallback table.
    pub const fn defaults() -> Self {
        Self {
            basic: Self::DEFAULT_BASIC,
            premium: Self::DEFAULT_PREMIUM,
            luxury: Self::DEFAULT_LUXURY,
        }
    }

    pub fn default_rate(package: Package) -> Decimal {
        Self::defaults().rate(package)
    }

    pub fn rate(
        &self,
        package: Package,
    ) -> Decimal {
        match package {
            Package::Basic => self.basic,
            Package::Premium => self.premium,
            Package::Luxury => self.luxury,
        }
    }

    fn set(
        &mut self,
        package: Package,
        rate: Decimal,
    ) {
        match package {
            Package::Basic => self.basic = rate,
            Package::Premium => self.premium = rate,
            Package::Luxury => self.luxury = rate,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Parsed rate a company declared for a tier, if it declared a usable one.
pub fn declared_rate(
    pricing: &CompanyPricing,
    package: Package,
) -> Option<Decimal> {
    pricing.declared(package).and_then(parse_leading_decimal)
}

/// Averages every company's declared rate, tier by tier.
///
/// Companies that did not declare a tier, or declared something that does
/// not parse, are left out of that tier's mean. A tier with no samples at all,
/// or whose samples are too large to sum, takes its default rate.
pub fn compute_average_rates(companies: &[CompanyPricing]) -> RateTable {
    let mut table = RateTable::defaults();

    for package in Package::ALL {
        let samples: Vec<Decimal> = companies
            .iter()
            .filter_map(|company| declared_rate(company, package))
            .collect();

        if samples.is_empty() {
            continue;
        }

        let Some(total) = samples
            .iter()
            .try_fold(Decimal::ZERO, |acc, rate| acc.checked_add(*rate))
        else {
            warn!(
                package = package.as_str(),
                samples = samples.len(),
                "declared rates overflow when summed, keeping the default"
            );
            continue;
        };
        table.set(package, total / Decimal::from(samples.len()));
    }

    table
}

/// Applies a company's own rates over the aggregate table.
///
/// Without a company context the aggregate is returned unchanged.
pub fn resolve_rates(
    context: Option<&CompanyContext>,
    aggregate: &RateTable,
) -> RateTable {
    let Some(context) = context else {
        return *aggregate;
    };

    let mut table = *aggregate;
    for package in Package::ALL {
        if let Some(rate) = declared_rate(&context.price_data, package) {
            table.set(package, rate);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn company(
        basic: Option<&str>,
        premium: Option<&str>,
        luxury: Option<&str>,
    ) -> CompanyPricing {
        CompanyPricing {
            name: None,
            basic_price_range: basic.map(str::to_string),
            premium_price_range: premium.map(str::to_string),
            luxury_price_range: luxury.map(str::to_string),
        }
    }

    fn context_with(price_data: CompanyPricing) -> CompanyContext {
        CompanyContext {
            company_id: "c1".to_string(),
            company_name: "Acme Interiors".to_string(),
            price_data,
        }
    }

    // =========================================================================
    // RateTable tests
    // =========================================================================

    #[test]
    fn defaults_are_150_500_1500() {
        let table = RateTable::default();

        assert_eq!(table.rate(Package::Basic), dec!(150));
        assert_eq!(table.rate(Package::Premium), dec!(500));
        assert_eq!(table.rate(Package::Luxury), dec!(1500));
    }

    // =========================================================================
    // compute_average_rates tests
    // =========================================================================

    #[test]
    fn empty_company_list_yields_defaults() {
        assert_eq!(compute_average_rates(&[]), RateTable::defaults());
    }

    #[test]
    fn averages_each_tier_independently() {
        let companies = vec![
            company(Some("100"), Some("600"), Some("1000")),
            company(Some("200"), Some("800"), None),
            company(Some("300"), None, None),
        ];

        let table = compute_average_rates(&companies);

        assert_eq!(table.basic, dec!(200));
        assert_eq!(table.premium, dec!(700));
        assert_eq!(table.luxury, dec!(1000));
    }

    #[test]
    fn unparseable_rates_do_not_count_as_samples() {
        let companies = vec![
            company(Some("100"), Some("on request"), None),
            company(Some("n/a"), Some(""), None),
        ];

        let table = compute_average_rates(&companies);

        assert_eq!(table.basic, dec!(100));
        assert_eq!(table.premium, RateTable::DEFAULT_PREMIUM);
    }

    #[test]
    fn tier_without_samples_falls_back_to_its_default() {
        let companies = vec![company(None, None, None), company(None, None, None)];

        let table = compute_average_rates(&companies);

        for package in Package::ALL {
            assert_eq!(table.rate(package), RateTable::default_rate(package));
        }
    }

    #[test]
    fn overflowing_tier_keeps_its_default() {
        let huge = "79228162514264337593543950335";
        let companies = vec![
            company(Some(huge), Some("600"), None),
            company(Some(huge), Some("800"), None),
        ];

        let table = compute_average_rates(&companies);

        assert_eq!(table.basic, RateTable::DEFAULT_BASIC);
        assert_eq!(table.premium, dec!(700));
    }

    #[test]
    fn mean_keeps_fractional_part() {
        let companies = vec![company(Some("100"), None, None), company(Some("101"), None, None)];

        let table = compute_average_rates(&companies);

        assert_eq!(table.basic, dec!(100.5));
    }

    // =========================================================================
    // resolve_rates tests
    // =========================================================================

    #[test]
    fn no_context_returns_aggregate() {
        let aggregate = RateTable {
            basic: dec!(111),
            premium: dec!(222),
            luxury: dec!(333),
        };

        assert_eq!(resolve_rates(None, &aggregate), aggregate);
    }

    #[test]
    fn company_rate_overrides_only_declared_tiers() {
        let aggregate = RateTable {
            basic: dec!(111),
            premium: dec!(222),
            luxury: dec!(333),
        };
        let context = context_with(company(Some("200"), None, None));

        let table = resolve_rates(Some(&context), &aggregate);

        assert_eq!(
            table,
            RateTable {
                basic: dec!(200),
                premium: dec!(222),
                luxury: dec!(333),
            }
        );
    }

    #[test]
    fn unparseable_company_rate_falls_back_to_aggregate() {
        let aggregate = RateTable::defaults();
        let context = context_with(company(Some("ask"), Some("900"), None));

        let table = resolve_rates(Some(&context), &aggregate);

        assert_eq!(table.basic, RateTable::DEFAULT_BASIC);
        assert_eq!(table.premium, dec!(900));
    }
}
