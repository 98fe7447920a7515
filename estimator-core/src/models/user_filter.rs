use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Residential,
    Commercial,
    Designer,
    Craftsman,
}

impl PageType {
    pub const ALL: [PageType; 4] = [
        PageType::Residential,
        PageType::Commercial,
        PageType::Designer,
        PageType::Craftsman,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Designer => "designer",
            Self::Craftsman => "craftsman",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            "designer" => Some(Self::Designer),
            "craftsman" => Some(Self::Craftsman),
            _ => None,
        }
    }
}

/// Filter controls a visitor had set when searching a listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub room_type: String,
    pub bhk_size: String,
    pub budget: String,
    pub assured_only: bool,
}

/// Search/filter usage reported by a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(default = "anonymous")]
    pub user_id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub filters: FilterSelection,
    pub page_type: PageType,
}

fn anonymous() -> String {
    UserFilter::ANONYMOUS.to_string()
}

impl UserFilter {
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(page_type: PageType) -> Self {
        Self {
            user_id: anonymous(),
            user_email: None,
            search_term: String::new(),
            filters: FilterSelection::default(),
            page_type,
        }
    }
}

/// Where a filter report came from, captured by the receiving side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// A stored filter report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilterRecord {
    pub id: i64,
    pub filter: UserFilter,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Listing parameters for stored filter reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilterQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub page_type: Option<PageType>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Default for UserFilterQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 50,
            page_type: None,
            start: None,
            end: None,
        }
    }
}

impl UserFilterQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilterPage {
    pub items: Vec<UserFilterRecord>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStatistics {
    pub total: u64,
    pub by_page_type: Vec<(PageType, u64)>,
    pub last_24_hours: u64,
    /// At most ten entries, most frequent first.
    pub top_search_terms: Vec<(String, u64)>,
}

/// Everything stored at the moment of an export, plus the highest id seen.
///
/// Purging up to `watermark` afterwards removes exactly the exported rows;
/// reports that arrive between the two phases survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSnapshot {
    /// Newest first.
    pub records: Vec<UserFilterRecord>,
    pub watermark: Option<i64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn minimal_report_takes_defaults() {
        let json = r#"{"pageType":"designer"}"#;

        let filter: UserFilter = serde_json::from_str(json).unwrap();

        assert_eq!(filter, UserFilter::new(PageType::Designer));
    }

    #[test]
    fn filter_kind_uses_type_key() {
        let selection = FilterSelection {
            kind: "Modular".to_string(),
            assured_only: true,
            ..Default::default()
        };

        let json = serde_json::to_value(&selection).unwrap();

        assert_eq!(json["type"], "Modular");
        assert_eq!(json["assuredOnly"], true);
    }

    #[test]
    fn offset_is_zero_for_first_page() {
        assert_eq!(UserFilterQuery::default().offset(), 0);
        assert_eq!(
            UserFilterQuery {
                page: 3,
                limit: 20,
                ..Default::default()
            }
            .offset(),
            40
        );
    }
}
