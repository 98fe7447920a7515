//! Two-phase export of stored filter reports.
//!
//! [`FilterExporter::export`] snapshots every report, writes the CSV, and
//! only then (and only when asked) purges the rows that were written. A
//! report stored between the snapshot and the purge is kept for the next
//! export.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, SecondsFormat};
use estimator_core::{EstimatorRepository, RepositoryError, UserFilterRecord};
use thiserror::Error;
use tracing::info;

pub const CSV_HEADERS: [&str; 13] = [
    "Timestamp",
    "User ID",
    "User Email",
    "Page Type",
    "Search Term",
    "Location",
    "Type",
    "Room Type",
    "BHK Size",
    "Budget",
    "Assured Only",
    "IP Address",
    "User Agent",
];

#[derive(Debug, Error)]
pub enum FilterExportError {
    #[error("No filter data found to download")]
    Empty,

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// What an export wrote and removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub exported: usize,
    /// `None` when the export was not asked to purge.
    pub purged: Option<u64>,
}

/// `user-filters-YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("user-filters-{}.csv", date.format("%Y-%m-%d"))
}

fn csv_row(record: &UserFilterRecord) -> [String; 13] {
    let filter = &record.filter;
    let selection = &filter.filters;
    [
        record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        filter.user_id.clone(),
        filter.user_email.clone().unwrap_or_default(),
        filter.page_type.as_str().to_string(),
        filter.search_term.clone(),
        selection.location.clone(),
        selection.kind.clone(),
        selection.room_type.clone(),
        selection.bhk_size.clone(),
        selection.budget.clone(),
        if selection.assured_only { "Yes" } else { "No" }.to_string(),
        record.ip_address.clone().unwrap_or_default(),
        record
            .user_agent
            .as_deref()
            .unwrap_or_default()
            .replace(',', ";"),
    ]
}

/// Writes `records` as CSV with every field quoted.
pub fn write_csv<W: Write>(
    records: &[UserFilterRecord],
    writer: W,
) -> Result<(), FilterExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for record in records {
        csv_writer.write_record(csv_row(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub struct FilterExporter;

impl FilterExporter {
    /// Exports every stored report into `dir`, named for `date`.
    ///
    /// Nothing is written when the store is empty. With `purge`, the
    /// exported rows are deleted after the file has been flushed.
    pub async fn export(
        repo: &dyn EstimatorRepository,
        dir: &Path,
        date: NaiveDate,
        purge: bool,
    ) -> Result<ExportOutcome, FilterExportError> {
        let snapshot = repo.snapshot_user_filters().await?;
        let Some(watermark) = snapshot.watermark else {
            return Err(FilterExportError::Empty);
        };

        let path = dir.join(export_file_name(date));
        let file = File::create(&path)?;
        write_csv(&snapshot.records, file)?;
        info!(path = %path.display(), records = snapshot.records.len(), "filter reports exported");

        let purged = if purge {
            let removed = repo.purge_user_filters_through(watermark).await?;
            info!(removed, watermark, "exported filter reports purged");
            Some(removed)
        } else {
            None
        };

        Ok(ExportOutcome {
            path,
            exported: snapshot.records.len(),
            purged,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use estimator_core::{FilterSelection, PageType, UserFilter};
    use pretty_assertions::assert_eq;

    use super::*;

    fn record() -> UserFilterRecord {
        UserFilterRecord {
            id: 7,
            filter: UserFilter {
                user_id: "u-19".to_string(),
                user_email: Some("dev@example.com".to_string()),
                search_term: "false ceiling".to_string(),
                filters: FilterSelection {
                    location: "Bengaluru".to_string(),
                    kind: "Modular".to_string(),
                    room_type: "Kitchen".to_string(),
                    bhk_size: "2 BHK".to_string(),
                    budget: "5-10L".to_string(),
                    assured_only: true,
                },
                page_type: PageType::Residential,
            },
            timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
            ip_address: Some("203.0.113.5".to_string()),
            user_agent: Some("Mozilla/5.0 (X11, Linux)".to_string()),
        }
    }

    #[test]
    fn file_name_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        assert_eq!(export_file_name(date), "user-filters-2024-03-09.csv");
    }

    #[test]
    fn writes_headers_and_quoted_rows() {
        let mut out = Vec::new();

        write_csv(&[record()], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "\"Timestamp\",\"User ID\",\"User Email\",\"Page Type\",\"Search Term\",\
             \"Location\",\"Type\",\"Room Type\",\"BHK Size\",\"Budget\",\"Assured Only\",\
             \"IP Address\",\"User Agent\""
        );
        assert_eq!(
            lines[1],
            "\"2024-03-09T14:05:00.000Z\",\"u-19\",\"dev@example.com\",\"residential\",\
             \"false ceiling\",\"Bengaluru\",\"Modular\",\"Kitchen\",\"2 BHK\",\"5-10L\",\
             \"Yes\",\"203.0.113.5\",\"Mozilla/5.0 (X11; Linux)\""
        );
    }

    #[test]
    fn absent_values_are_empty_and_flag_is_no() {
        let mut bare = record();
        bare.filter.user_email = None;
        bare.filter.filters.assured_only = false;
        bare.ip_address = None;
        bare.user_agent = None;

        let row = csv_row(&bare);

        assert_eq!(row[2], "");
        assert_eq!(row[10], "No");
        assert_eq!(row[11], "");
        assert_eq!(row[12], "");
    }
}
