use std::io::Read;

use estimator_core::{EstimatorRepository, NewCompany, RepositoryError};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when importing company pricing.
#[derive(Debug, Error)]
pub enum CompanyLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {row}: company name is empty")]
    MissingName { row: usize },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for CompanyLoaderError {
    fn from(err: csv::Error) -> Self {
        CompanyLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the company pricing CSV.
///
/// Columns: `name,basic_price_range,premium_price_range,luxury_price_range`.
/// Rates are kept as written (e.g. `"1,200"` or `"1500 per sq. ft."`) and
/// an empty cell means the company does not offer that tier.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_rate")]
    pub basic_price_range: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_rate")]
    pub premium_price_range: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_rate")]
    pub luxury_price_range: Option<String>,
}

fn deserialize_optional_rate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

impl From<&CompanyRecord> for NewCompany {
    fn from(record: &CompanyRecord) -> Self {
        NewCompany {
            name: record.name.trim().to_string(),
            basic_price_range: record.basic_price_range.clone(),
            premium_price_range: record.premium_price_range.clone(),
            luxury_price_range: record.luxury_price_range.clone(),
        }
    }
}

/// Loader for company pricing from CSV files.
///
/// Works through the [`EstimatorRepository`] trait, so any backend can be
/// filled. Rows are upserted by company name, which makes re-running an
/// import with corrected rates safe.
pub struct CompanyPricingLoader;

impl CompanyPricingLoader {
    /// Parse company records from any CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CompanyRecord>, CompanyLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: CompanyRecord = result?;
            if record.name.trim().is_empty() {
                // +2: header line, then 1-based rows
                return Err(CompanyLoaderError::MissingName { row: index + 2 });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Upsert every record; returns how many rows were written.
    pub async fn load(
        repo: &dyn EstimatorRepository,
        records: &[CompanyRecord],
    ) -> Result<usize, CompanyLoaderError> {
        for record in records {
            let company = repo.upsert_company(&NewCompany::from(record)).await?;
            debug!(id = company.id, name = %company.name, "company pricing stored");
        }
        Ok(records.len())
    }
}
