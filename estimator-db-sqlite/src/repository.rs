use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use estimator_core::services::{PricingError, PricingSource};
use estimator_core::{
    Company, CompanyPricing, EstimatorRepository, FilterSelection, FilterSnapshot,
    FilterStatistics, HomeType, NewCompany, Package, PageType, QuoteRequest, RepositoryError,
    RequestOrigin, Scope, StoredQuote, UserDetails, UserFilter, UserFilterPage, UserFilterQuery,
    UserFilterRecord,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

const TOP_SEARCH_TERMS: i64 = 10;

const USER_FILTER_COLUMNS: &str = "id, user_id, user_email, search_term, location, filter_type,
        room_type, bhk_size, budget, assured_only, page_type, timestamp, ip_address, user_agent";

const QUOTE_COLUMNS: &str = "id, scope, home_type, carpet_area, rooms, package, name, email,
        phone, city, estimated_cost, company_id, company_name, created_at";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens (creating if missing) the database at `database_url`.
    ///
    /// Accepts a bare path, a `sqlite:` URL, or `:memory:`. An in-memory
    /// database is held on a single connection so every query sees the same
    /// schema.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database location: {}", database_url))?
            .create_if_missing(true);

        let in_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn column<'r, T>(
    row: &'r SqliteRow,
    name: &str,
) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Database(format!("Failed to get {}: {}", name, e)))
}

fn invalid(
    what: &str,
    value: &str,
) -> RepositoryError {
    RepositoryError::Database(format!("Invalid {} stored: '{}'", what, value))
}

fn row_to_company(row: &SqliteRow) -> Result<Company, RepositoryError> {
    let name: String = column(row, "name")?;
    Ok(Company {
        id: column(row, "id")?,
        pricing: CompanyPricing {
            name: Some(name.clone()),
            basic_price_range: column(row, "basic_price_range")?,
            premium_price_range: column(row, "premium_price_range")?,
            luxury_price_range: column(row, "luxury_price_range")?,
        },
        name,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
    })
}

fn row_to_quote(row: &SqliteRow) -> Result<StoredQuote, RepositoryError> {
    let scope: String = column(row, "scope")?;
    let home_type: String = column(row, "home_type")?;
    let package: String = column(row, "package")?;
    let rooms: String = column(row, "rooms")?;

    Ok(StoredQuote {
        id: column(row, "id")?,
        request: QuoteRequest {
            scope: Scope::parse(&scope).ok_or_else(|| invalid("scope", &scope))?,
            home_type: HomeType::parse(&home_type)
                .ok_or_else(|| invalid("home type", &home_type))?,
            carpet_area: column(row, "carpet_area")?,
            rooms: serde_json::from_str(&rooms).map_err(|_| invalid("rooms", &rooms))?,
            package: Package::parse(&package).ok_or_else(|| invalid("package", &package))?,
            user_details: UserDetails {
                name: column(row, "name")?,
                email: column(row, "email")?,
                phone: column(row, "phone")?,
                city: column(row, "city")?,
            },
            estimated_cost: column(row, "estimated_cost")?,
            company_id: column(row, "company_id")?,
            company_name: column(row, "company_name")?,
        },
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
    })
}

fn row_to_user_filter(row: &SqliteRow) -> Result<UserFilterRecord, RepositoryError> {
    let page_type: String = column(row, "page_type")?;
    Ok(UserFilterRecord {
        id: column(row, "id")?,
        filter: UserFilter {
            user_id: column(row, "user_id")?,
            user_email: column(row, "user_email")?,
            search_term: column(row, "search_term")?,
            filters: FilterSelection {
                location: column(row, "location")?,
                kind: column(row, "filter_type")?,
                room_type: column(row, "room_type")?,
                bhk_size: column(row, "bhk_size")?,
                budget: column(row, "budget")?,
                assured_only: column(row, "assured_only")?,
            },
            page_type: PageType::parse(&page_type)
                .ok_or_else(|| invalid("page type", &page_type))?,
        },
        timestamp: column::<DateTime<Utc>>(row, "timestamp")?,
        ip_address: column(row, "ip_address")?,
        user_agent: column(row, "user_agent")?,
    })
}

/// Appends the WHERE clause shared by the filter listing and its count.
fn push_filter_conditions(
    builder: &mut QueryBuilder<'_, Sqlite>,
    query: &UserFilterQuery,
) {
    let mut sep = " WHERE ";
    if let Some(page_type) = query.page_type {
        builder.push(sep).push("page_type = ").push_bind(page_type.as_str());
        sep = " AND ";
    }
    if let Some(start) = query.start {
        builder.push(sep).push("timestamp >= ").push_bind(start);
        sep = " AND ";
    }
    if let Some(end) = query.end {
        builder.push(sep).push("timestamp <= ").push_bind(end);
    }
}

#[async_trait]
impl EstimatorRepository for SqliteRepository {
    async fn upsert_company(
        &self,
        company: &NewCompany,
    ) -> Result<Company, RepositoryError> {
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO companies (
                name, basic_price_range, premium_price_range, luxury_price_range,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (name) DO UPDATE SET
                basic_price_range = excluded.basic_price_range,
                premium_price_range = excluded.premium_price_range,
                luxury_price_range = excluded.luxury_price_range,
                updated_at = excluded.updated_at",
        )
        .bind(&company.name)
        .bind(&company.basic_price_range)
        .bind(&company.premium_price_range)
        .bind(&company.luxury_price_range)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        self.get_company_by_name(&company.name).await
    }

    async fn get_company_by_name(
        &self,
        name: &str,
    ) -> Result<Company, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, basic_price_range, premium_price_range, luxury_price_range,
                    created_at, updated_at
             FROM companies WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_company(&row)
    }

    async fn list_companies(&self) -> Result<Vec<Company>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, basic_price_range, premium_price_range, luxury_price_range,
                    created_at, updated_at
             FROM companies ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_company).collect()
    }

    async fn create_quote(
        &self,
        quote: &QuoteRequest,
    ) -> Result<StoredQuote, RepositoryError> {
        let rooms = serde_json::to_string(&quote.rooms)
            .map_err(|e| RepositoryError::Database(format!("Failed to encode rooms: {}", e)))?;

        let result = sqlx::query(
            "INSERT INTO quotes (
                scope, home_type, carpet_area, rooms, package, name, email, phone, city,
                estimated_cost, company_id, company_name, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(quote.scope.as_str())
        .bind(quote.home_type.to_string())
        .bind(&quote.carpet_area)
        .bind(rooms)
        .bind(quote.package.as_str())
        .bind(&quote.user_details.name)
        .bind(&quote.user_details.email)
        .bind(&quote.user_details.phone)
        .bind(&quote.user_details.city)
        .bind(quote.estimated_cost)
        .bind(&quote.company_id)
        .bind(&quote.company_name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        self.get_quote(result.last_insert_rowid()).await
    }

    async fn get_quote(
        &self,
        id: i64,
    ) -> Result<StoredQuote, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {} FROM quotes WHERE id = ?", QUOTE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_quote(&row)
    }

    async fn list_quotes(&self) -> Result<Vec<StoredQuote>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM quotes ORDER BY created_at DESC, id DESC",
            QUOTE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_quote).collect()
    }

    async fn store_user_filter(
        &self,
        filter: &UserFilter,
        origin: &RequestOrigin,
    ) -> Result<UserFilterRecord, RepositoryError> {
        let user_id = if filter.user_id.trim().is_empty() {
            UserFilter::ANONYMOUS
        } else {
            filter.user_id.as_str()
        };

        let result = sqlx::query(
            "INSERT INTO user_filters (
                user_id, user_email, search_term, location, filter_type, room_type,
                bhk_size, budget, assured_only, page_type, timestamp, ip_address, user_agent
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&filter.user_email)
        .bind(&filter.search_term)
        .bind(&filter.filters.location)
        .bind(&filter.filters.kind)
        .bind(&filter.filters.room_type)
        .bind(&filter.filters.bhk_size)
        .bind(&filter.filters.budget)
        .bind(filter.filters.assured_only)
        .bind(filter.page_type.as_str())
        .bind(Utc::now())
        .bind(&origin.ip_address)
        .bind(&origin.user_agent)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM user_filters WHERE id = ?",
            USER_FILTER_COLUMNS
        ))
        .bind(result.last_insert_rowid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row_to_user_filter(&row)
    }

    async fn list_user_filters(
        &self,
        query: &UserFilterQuery,
    ) -> Result<UserFilterPage, RepositoryError> {
        let limit = query.limit.max(1);
        let page = query.page.max(1);

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM user_filters");
        push_filter_conditions(&mut count, query);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM user_filters", USER_FILTER_COLUMNS));
        push_filter_conditions(&mut select, query);
        select
            .push(" ORDER BY timestamp DESC, id DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::from(page - 1) * i64::from(limit));

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let items = rows
            .iter()
            .map(row_to_user_filter)
            .collect::<Result<Vec<_>, _>>()?;

        let total_items = u64::try_from(total).unwrap_or(0);
        Ok(UserFilterPage {
            items,
            current_page: page,
            total_pages: total_items.div_ceil(u64::from(limit)),
            total_items,
            items_per_page: limit,
        })
    }

    async fn filter_statistics(&self) -> Result<FilterStatistics, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_filters")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let rows = sqlx::query(
            "SELECT page_type, COUNT(*) AS count FROM user_filters GROUP BY page_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let mut by_page_type = Vec::with_capacity(rows.len());
        for row in &rows {
            let page_type: String = column(row, "page_type")?;
            let count: i64 = column(row, "count")?;
            let page_type =
                PageType::parse(&page_type).ok_or_else(|| invalid("page type", &page_type))?;
            by_page_type.push((page_type, u64::try_from(count).unwrap_or(0)));
        }
        by_page_type.sort_by_key(|(page_type, _)| *page_type);

        let last_24_hours: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_filters WHERE timestamp >= ?")
                .bind(Utc::now() - Duration::hours(24))
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;

        let rows = sqlx::query(
            "SELECT search_term, COUNT(*) AS count FROM user_filters
             WHERE search_term != ''
             GROUP BY search_term
             ORDER BY count DESC, search_term ASC
             LIMIT ?",
        )
        .bind(TOP_SEARCH_TERMS)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let top_search_terms = rows
            .iter()
            .map(|row| {
                let term: String = column(row, "search_term")?;
                let count: i64 = column(row, "count")?;
                Ok((term, u64::try_from(count).unwrap_or(0)))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(FilterStatistics {
            total: u64::try_from(total).unwrap_or(0),
            by_page_type,
            last_24_hours: u64::try_from(last_24_hours).unwrap_or(0),
            top_search_terms,
        })
    }

    async fn snapshot_user_filters(&self) -> Result<FilterSnapshot, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM user_filters ORDER BY timestamp DESC, id DESC",
            USER_FILTER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let records = rows
            .iter()
            .map(row_to_user_filter)
            .collect::<Result<Vec<_>, _>>()?;
        let watermark = records.iter().map(|r| r.id).max();

        Ok(FilterSnapshot { records, watermark })
    }

    async fn purge_user_filters_through(
        &self,
        watermark: i64,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM user_filters WHERE id <= ?")
            .bind(watermark)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PricingSource for SqliteRepository {
    async fn fetch_companies(&self) -> Result<Vec<CompanyPricing>, PricingError> {
        let companies = self.list_companies().await?;
        Ok(companies.into_iter().map(|c| c.pricing).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn new_company(
        name: &str,
        basic: Option<&str>,
    ) -> NewCompany {
        NewCompany {
            name: name.to_string(),
            basic_price_range: basic.map(str::to_string),
            premium_price_range: Some("1800".to_string()),
            luxury_price_range: None,
        }
    }

    fn test_quote() -> QuoteRequest {
        QuoteRequest {
            scope: Scope::NewDesign,
            home_type: HomeType::Villa,
            carpet_area: "2400".to_string(),
            rooms: vec!["Living Room".to_string(), "Bedroom 1".to_string(), "Bedroom 2".to_string()],
            package: Package::Luxury,
            user_details: UserDetails {
                name: "Farah".to_string(),
                email: "farah@example.com".to_string(),
                phone: "9123456780".to_string(),
                city: "Hyderabad".to_string(),
            },
            estimated_cost: 3_600_000,
            company_id: None,
            company_name: None,
        }
    }

    fn filter(
        page_type: PageType,
        term: &str,
    ) -> UserFilter {
        UserFilter {
            search_term: term.to_string(),
            ..UserFilter::new(page_type)
        }
    }

    async fn set_timestamp(
        repo: &SqliteRepository,
        id: i64,
        timestamp: DateTime<Utc>,
    ) {
        sqlx::query("UPDATE user_filters SET timestamp = ? WHERE id = ?")
            .bind(timestamp)
            .bind(id)
            .execute(repo.pool())
            .await
            .expect("Failed to backdate filter");
    }

    // ── companies ────────────────────────────────────────────────────────
    #[tokio::test]
    async fn test_upsert_company_inserts_then_replaces_rates() {
        let repo = setup_test_db().await;

        let first = repo
            .upsert_company(&new_company("Acme Interiors", Some("1200")))
            .await
            .expect("Should insert company");
        let second = repo
            .upsert_company(&new_company("Acme Interiors", None))
            .await
            .expect("Should update company");

        assert_eq!(first.id, second.id);
        assert_eq!(second.pricing.basic_price_range, None);
        assert_eq!(second.pricing.premium_price_range.as_deref(), Some("1800"));
        assert_eq!(repo.list_companies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_company_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_company_by_name("Nobody").await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_repository_as_pricing_source() {
        let repo = setup_test_db().await;
        repo.upsert_company(&new_company("B Studio", Some("900")))
            .await
            .unwrap();
        repo.upsert_company(&new_company("A Studio", Some("1100")))
            .await
            .unwrap();

        let pricing = repo.fetch_companies().await.expect("Should list pricing");

        assert_eq!(pricing.len(), 2);
        assert_eq!(pricing[0].name.as_deref(), Some("A Studio"));
        assert_eq!(pricing[0].basic_price_range.as_deref(), Some("1100"));
    }

    // ── quotes ───────────────────────────────────────────────────────────
    #[tokio::test]
    async fn test_create_and_get_quote() {
        let repo = setup_test_db().await;

        let stored = repo
            .create_quote(&test_quote())
            .await
            .expect("Should store quote");
        let fetched = repo.get_quote(stored.id).await.expect("Should fetch quote");

        assert_eq!(fetched.request, test_quote());
        assert_eq!(repo.list_quotes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_quote_not_found() {
        let repo = setup_test_db().await;

        assert!(matches!(repo.get_quote(42).await, Err(RepositoryError::NotFound)));
    }

    // ── user filters ─────────────────────────────────────────────────────
    #[tokio::test]
    async fn test_store_user_filter_records_origin() {
        let repo = setup_test_db().await;
        let origin = RequestOrigin {
            ip_address: Some("10.0.0.7".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
        };
        let mut report = filter(PageType::Commercial, "office");
        report.filters.assured_only = true;
        report.user_id = String::new();

        let record = repo
            .store_user_filter(&report, &origin)
            .await
            .expect("Should store filter");

        assert_eq!(record.filter.user_id, "anonymous");
        assert!(record.filter.filters.assured_only);
        assert_eq!(record.ip_address.as_deref(), Some("10.0.0.7"));
        assert_eq!(record.filter.page_type, PageType::Commercial);
    }

    #[tokio::test]
    async fn test_list_user_filters_pages_newest_first() {
        let repo = setup_test_db().await;
        let origin = RequestOrigin::default();
        for i in 0..5 {
            let record = repo
                .store_user_filter(&filter(PageType::Residential, &format!("t{i}")), &origin)
                .await
                .unwrap();
            set_timestamp(&repo, record.id, Utc::now() - Duration::minutes(10 - i)).await;
        }

        let page = repo
            .list_user_filters(&UserFilterQuery {
                page: 2,
                limit: 2,
                ..Default::default()
            })
            .await
            .expect("Should list filters");

        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        let terms: Vec<&str> = page
            .items
            .iter()
            .map(|r| r.filter.search_term.as_str())
            .collect();
        assert_eq!(terms, vec!["t2", "t1"]);
    }

    #[tokio::test]
    async fn test_list_user_filters_by_page_type_and_date() {
        let repo = setup_test_db().await;
        let origin = RequestOrigin::default();
        let old = repo
            .store_user_filter(&filter(PageType::Designer, "old"), &origin)
            .await
            .unwrap();
        set_timestamp(&repo, old.id, Utc::now() - Duration::days(3)).await;
        repo.store_user_filter(&filter(PageType::Designer, "new"), &origin)
            .await
            .unwrap();
        repo.store_user_filter(&filter(PageType::Craftsman, "other"), &origin)
            .await
            .unwrap();

        let page = repo
            .list_user_filters(&UserFilterQuery {
                page_type: Some(PageType::Designer),
                start: Some(Utc::now() - Duration::days(1)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].filter.search_term, "new");
    }

    #[tokio::test]
    async fn test_filter_statistics() {
        let repo = setup_test_db().await;
        let origin = RequestOrigin::default();
        for (page_type, term) in [
            (PageType::Residential, "modular kitchen"),
            (PageType::Residential, "modular kitchen"),
            (PageType::Residential, ""),
            (PageType::Designer, "wardrobe"),
        ] {
            repo.store_user_filter(&filter(page_type, term), &origin)
                .await
                .unwrap();
        }
        let stale = repo
            .store_user_filter(&filter(PageType::Craftsman, "carpenter"), &origin)
            .await
            .unwrap();
        set_timestamp(&repo, stale.id, Utc::now() - Duration::hours(30)).await;

        let stats = repo.filter_statistics().await.expect("Should compute stats");

        assert_eq!(stats.total, 5);
        assert_eq!(stats.last_24_hours, 4);
        assert_eq!(
            stats.by_page_type,
            vec![
                (PageType::Residential, 3),
                (PageType::Designer, 1),
                (PageType::Craftsman, 1),
            ]
        );
        assert_eq!(
            stats.top_search_terms,
            vec![
                ("modular kitchen".to_string(), 2),
                ("carpenter".to_string(), 1),
                ("wardrobe".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_snapshot_then_purge_keeps_later_reports() {
        let repo = setup_test_db().await;
        let origin = RequestOrigin::default();
        for term in ["a", "b"] {
            repo.store_user_filter(&filter(PageType::Residential, term), &origin)
                .await
                .unwrap();
        }

        let snapshot = repo.snapshot_user_filters().await.expect("Should snapshot");
        repo.store_user_filter(&filter(PageType::Residential, "late"), &origin)
            .await
            .unwrap();
        let purged = repo
            .purge_user_filters_through(snapshot.watermark.expect("watermark"))
            .await
            .expect("Should purge");

        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(purged, 2);
        let remaining = repo.snapshot_user_filters().await.unwrap();
        assert_eq!(remaining.records.len(), 1);
        assert_eq!(remaining.records[0].filter.search_term, "late");
    }

    #[tokio::test]
    async fn test_snapshot_of_empty_store_has_no_watermark() {
        let repo = setup_test_db().await;

        let snapshot = repo.snapshot_user_filters().await.unwrap();

        assert_eq!(snapshot, FilterSnapshot::default());
    }
}
