//! Admin data tools: company pricing import and filter report export.

pub mod company_loader;
pub mod filter_export;

pub use company_loader::{CompanyLoaderError, CompanyPricingLoader, CompanyRecord};
pub use filter_export::{ExportOutcome, FilterExportError, FilterExporter};
