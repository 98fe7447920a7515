//! Pricing and cost calculations for interior estimates.
//!
//! This module provides the rate table logic (aggregating company pricing,
//! resolving the active rates) and the cost derivation built on it.

pub mod common;
pub mod cost;
pub mod pricing;

pub use cost::{
    derive_cost, derive_cost_from_input, format_indian_grouping, package_comparison,
    parse_display_amount,
};
pub use pricing::{RateTable, compute_average_rates, declared_rate, resolve_rates};
