//! Integration tests for the admin data tools against a real SQLite backend.

use chrono::NaiveDate;
use estimator_core::calculations::compute_average_rates;
use estimator_core::services::PricingSource;
use estimator_core::{EstimatorRepository, PageType, RequestOrigin, UserFilter};
use estimator_data::{CompanyPricingLoader, FilterExportError, FilterExporter};
use estimator_db_sqlite::SqliteRepository;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const COMPANIES_CSV: &str = include_str!("../test-data/companies.csv");
const COMPANIES_UPDATE_CSV: &str = include_str!("../test-data/companies_update.csv");

async fn setup_test_db() -> SqliteRepository {
    let repo = SqliteRepository::new(":memory:")
        .await
        .expect("Failed to create in-memory database");
    repo.run_migrations()
        .await
        .expect("Failed to run migrations");
    repo
}

async fn import(
    repo: &SqliteRepository,
    csv: &str,
) -> usize {
    let records = CompanyPricingLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");
    CompanyPricingLoader::load(repo, &records)
        .await
        .expect("Failed to load companies")
}

async fn store_filters(
    repo: &SqliteRepository,
    terms: &[&str],
) {
    let origin = RequestOrigin {
        ip_address: Some("198.51.100.4".to_string()),
        user_agent: Some("Mozilla/5.0 (Windows NT 10.0, Win64)".to_string()),
    };
    for term in terms {
        let mut filter = UserFilter::new(PageType::Designer);
        filter.search_term = term.to_string();
        repo.store_user_filter(&filter, &origin)
            .await
            .expect("Failed to store filter");
    }
}

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 2).unwrap()
}

// ── company import ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_companies_fixture() {
    let repo = setup_test_db().await;

    let stored = import(&repo, COMPANIES_CSV).await;

    assert_eq!(stored, 4);
    let companies = repo.list_companies().await.unwrap();
    assert_eq!(companies.len(), 4);
    let nest = repo.get_company_by_name("Nest Makers").await.unwrap();
    assert_eq!(nest.pricing.basic_price_range, None);
}

#[tokio::test]
async fn test_reimport_updates_by_name() {
    let repo = setup_test_db().await;
    import(&repo, COMPANIES_CSV).await;

    import(&repo, COMPANIES_UPDATE_CSV).await;

    assert_eq!(repo.list_companies().await.unwrap().len(), 5);
    let acme = repo.get_company_by_name("Acme Interiors").await.unwrap();
    assert_eq!(acme.pricing.basic_price_range.as_deref(), Some("1300"));
    assert_eq!(acme.pricing.luxury_price_range.as_deref(), Some("2800"));
}

#[tokio::test]
async fn test_imported_rates_feed_the_aggregate() {
    let repo = setup_test_db().await;
    import(&repo, COMPANIES_CSV).await;

    let pricing = repo.fetch_companies().await.unwrap();
    let rates = compute_average_rates(&pricing);

    // basic: 1200, 1000, 800; premium: 1800, 2000; luxury: 2600, 3400
    assert_eq!(rates.basic, dec!(1000));
    assert_eq!(rates.premium, dec!(1900));
    assert_eq!(rates.luxury, dec!(3000));
}

// ── filter export ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_export_writes_csv_and_keeps_rows_without_purge() {
    let repo = setup_test_db().await;
    store_filters(&repo, &["sofa", "wardrobe"]).await;
    let dir = tempfile::tempdir().unwrap();

    let outcome = FilterExporter::export(&repo, dir.path(), export_date(), false)
        .await
        .expect("Export should succeed");

    assert_eq!(outcome.exported, 2);
    assert_eq!(outcome.purged, None);
    assert_eq!(
        outcome.path,
        dir.path().join("user-filters-2024-11-02.csv")
    );
    let text = std::fs::read_to_string(&outcome.path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("\"Mozilla/5.0 (Windows NT 10.0; Win64)\""));
    assert_eq!(repo.filter_statistics().await.unwrap().total, 2);
}

#[tokio::test]
async fn test_export_with_purge_empties_the_store() {
    let repo = setup_test_db().await;
    store_filters(&repo, &["sofa", "wardrobe", "lighting"]).await;
    let dir = tempfile::tempdir().unwrap();

    let outcome = FilterExporter::export(&repo, dir.path(), export_date(), true)
        .await
        .expect("Export should succeed");

    assert_eq!(outcome.exported, 3);
    assert_eq!(outcome.purged, Some(3));
    assert_eq!(repo.filter_statistics().await.unwrap().total, 0);
}

#[tokio::test]
async fn test_export_of_empty_store_writes_nothing() {
    let repo = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();

    let err = FilterExporter::export(&repo, dir.path(), export_date(), true)
        .await
        .unwrap_err();

    assert!(matches!(err, FilterExportError::Empty));
    assert_eq!(err.to_string(), "No filter data found to download");
    assert!(!dir.path().join("user-filters-2024-11-02.csv").exists());
}

#[tokio::test]
async fn test_export_into_missing_directory_keeps_rows() {
    let repo = setup_test_db().await;
    store_filters(&repo, &["sofa"]).await;
    let dir = tempfile::tempdir().unwrap();

    let err = FilterExporter::export(&repo, &dir.path().join("absent"), export_date(), true)
        .await
        .unwrap_err();

    assert!(matches!(err, FilterExportError::Io(_)));
    assert_eq!(repo.filter_statistics().await.unwrap().total, 1);
}
