mod company;
mod home_type;
mod package;
mod quote;
mod scope;
mod user_details;
mod user_filter;
mod wizard_state;

pub use company::{Company, CompanyContext, CompanyPricing, NewCompany};
pub use home_type::{HomeType, RoomLimits};
pub use package::Package;
pub use quote::{Confirmation, QuoteRequest, QuoteResponse, StoredQuote};
pub use scope::Scope;
pub use user_details::{UserDetailField, UserDetails};
pub use user_filter::{
    FilterSelection, FilterSnapshot, FilterStatistics, PageType, RequestOrigin, UserFilter,
    UserFilterPage, UserFilterQuery, UserFilterRecord,
};
pub use wizard_state::WizardState;
