use serde::de::value::StringDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use super::{CompanyContext, HomeType, Package, Scope, UserDetails};
use crate::calculations::cost::parse_display_amount;

/// The form record threaded through every wizard step.
///
/// Only the form store mutates this (see [`crate::wizard::EstimateForm`]);
/// steps receive it as a read-only snapshot. `estimated_cost` is always a
/// function of `carpet_area`, `package` and the active rate table.
///
/// Field names serialize in the camelCase layout the quote intake endpoint
/// expects. Empty strings for the enum fields deserialize as unset, so drafts
/// written by older clients still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub scope: Option<Scope>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub home_type: Option<HomeType>,
    #[serde(default)]
    pub carpet_area: String,
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub package: Option<Package>,
    #[serde(default)]
    pub user_details: UserDetails,
    #[serde(default, deserialize_with = "deserialize_cost")]
    pub estimated_cost: i64,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl WizardState {
    /// Empty state pre-seeded with the company the wizard was opened from.
    pub fn for_company(context: Option<&CompanyContext>) -> Self {
        Self {
            company_id: context.map(|c| c.company_id.clone()),
            company_name: context.map(|c| c.company_name.clone()),
            ..Default::default()
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            T::deserialize(StringDeserializer::<D::Error>::new(value.to_string())).map(Some)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCost {
    Whole(i64),
    Fractional(f64),
    Display(String),
}

/// Accepts the cost as an integer, a float, or a display string such as
/// `"5,00,000"`.
fn deserialize_cost<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCost>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawCost::Whole(n)) => Ok(n),
        Some(RawCost::Fractional(f)) => Ok(f.round() as i64),
        Some(RawCost::Display(s)) => parse_display_amount(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid estimated cost '{s}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_source_style_empty_strings() {
        let json = r#"{
            "scope": "",
            "homeType": "",
            "carpetArea": "",
            "rooms": [],
            "package": "",
            "userDetails": {"name": "", "email": "", "phone": "", "city": ""},
            "estimatedCost": 0,
            "companyId": null,
            "companyName": null
        }"#;

        let state: WizardState = serde_json::from_str(json).unwrap();

        assert_eq!(state, WizardState::default());
    }

    #[test]
    fn deserializes_formatted_cost_string() {
        let json = r#"{"scope":"New Design","homeType":"3 BHK","package":"Premium","estimatedCost":"5,00,000"}"#;

        let state: WizardState = serde_json::from_str(json).unwrap();

        assert_eq!(state.scope, Some(Scope::NewDesign));
        assert_eq!(state.home_type, Some(HomeType::Bhk(3)));
        assert_eq!(state.package, Some(Package::Premium));
        assert_eq!(state.estimated_cost, 500_000);
    }

    #[test]
    fn rejects_unknown_package() {
        let json = r#"{"package":"Platinum"}"#;

        assert!(serde_json::from_str::<WizardState>(json).is_err());
    }

    #[test]
    fn for_company_seeds_identity_only() {
        let context = CompanyContext {
            company_id: "c42".to_string(),
            company_name: "Acme Interiors".to_string(),
            price_data: Default::default(),
        };

        let state = WizardState::for_company(Some(&context));

        assert_eq!(state.company_id.as_deref(), Some("c42"));
        assert_eq!(state.company_name.as_deref(), Some("Acme Interiors"));
        assert!(state.rooms.is_empty());
        assert_eq!(state.estimated_cost, 0);
    }
}
