use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Package;

/// Per-tier rates a company declares on its profile.
///
/// Rates stay in their declared text form; they are parsed only when a rate
/// table is built, so a malformed value excludes that one company from the
/// aggregate instead of failing the whole listing. JSON numbers are accepted
/// and kept as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub basic_price_range: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub premium_price_range: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub luxury_price_range: Option<String>,
}

impl CompanyPricing {
    /// Declared rate text for a tier, if any.
    pub fn declared(
        &self,
        package: Package,
    ) -> Option<&str> {
        match package {
            Package::Basic => self.basic_price_range.as_deref(),
            Package::Premium => self.premium_price_range.as_deref(),
            Package::Luxury => self.luxury_price_range.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRate {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_rate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawRate> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawRate::Text(s)) if s.trim().is_empty() => None,
        Some(RawRate::Text(s)) => Some(s),
        Some(RawRate::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Company the wizard was opened from, passed in by the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyContext {
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub price_data: CompanyPricing,
}

/// A company pricing record as stored by a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub pricing: CompanyPricing,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating or replacing a company (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub basic_price_range: Option<String>,
    pub premium_price_range: Option<String>,
    pub luxury_price_range: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepts_string_and_numeric_rates() {
        let json = r#"{"name":"Acme","basicPriceRange":"1200","premiumPriceRange":1800.5}"#;

        let pricing: CompanyPricing = serde_json::from_str(json).unwrap();

        assert_eq!(pricing.basic_price_range.as_deref(), Some("1200"));
        assert_eq!(pricing.premium_price_range.as_deref(), Some("1800.5"));
        assert_eq!(pricing.luxury_price_range, None);
    }

    #[test]
    fn blank_and_null_rates_are_absent() {
        let json = r#"{"basicPriceRange":"  ","luxuryPriceRange":null}"#;

        let pricing: CompanyPricing = serde_json::from_str(json).unwrap();

        assert_eq!(pricing, CompanyPricing::default());
    }

    #[test]
    fn ignores_unrelated_company_fields() {
        let json = r#"{"_id":"65f0","name":"Acme","rating":4.5,"basicPriceRange":"900"}"#;

        let pricing: CompanyPricing = serde_json::from_str(json).unwrap();

        assert_eq!(pricing.declared(Package::Basic), Some("900"));
    }

    #[test]
    fn context_without_price_data_defaults_to_empty() {
        let json = r#"{"companyId":"c1","companyName":"Acme Interiors"}"#;

        let context: CompanyContext = serde_json::from_str(json).unwrap();

        assert_eq!(context.company_name, "Acme Interiors");
        assert_eq!(context.price_data, CompanyPricing::default());
    }
}
