use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use estimator_core::calculations::format_indian_grouping;
use estimator_core::{EstimatorRepository, PageType, UserFilterQuery};
use estimator_data::{CompanyPricingLoader, FilterExportError, FilterExporter};
use estimator_db_sqlite::SqliteRepository;
use tracing_subscriber::EnvFilter;

/// Admin tools for the estimator database.
#[derive(Parser, Debug)]
#[command(name = "estimator-data")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database file or URL; created and migrated if missing
    #[arg(short, long, default_value = "estimator.db", global = true)]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import company pricing from a CSV file
    /// (name,basic_price_range,premium_price_range,luxury_price_range)
    ImportCompanies {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Write all filter reports to user-filters-YYYY-MM-DD.csv
    ExportFilters {
        /// Directory the CSV is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Delete the exported reports once the file is written
        #[arg(long, default_value_t = false)]
        purge: bool,
    },

    /// List stored filter reports, newest first
    ListFilters {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// residential, commercial, designer or craftsman
        #[arg(long, value_parser = parse_page_type)]
        page_type: Option<PageType>,

        /// Earliest report, as YYYY-MM-DD or an RFC 3339 timestamp
        #[arg(long, value_parser = parse_start)]
        start: Option<DateTime<Utc>>,

        /// Latest report, as YYYY-MM-DD (inclusive) or an RFC 3339 timestamp
        #[arg(long, value_parser = parse_end)]
        end: Option<DateTime<Utc>>,
    },

    /// Show filter report statistics
    FilterStats,

    /// List submitted quotes, newest first
    ListQuotes,
}

fn parse_page_type(s: &str) -> Result<PageType, String> {
    PageType::parse(s).ok_or_else(|| {
        let names: Vec<_> = PageType::ALL.iter().map(|p| p.as_str()).collect();
        format!("expected one of {}", names.join(", "))
    })
}

fn parse_instant(
    s: &str,
    end_of_day: bool,
) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{s}' is neither YYYY-MM-DD nor RFC 3339"))?;
    let time = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| format!("'{s}' is out of range"))
}

fn parse_start(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s, false)
}

fn parse_end(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s, true)
}

async fn open_repo(database: &str) -> Result<SqliteRepository> {
    let repo = SqliteRepository::new(database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", database))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;
    Ok(repo)
}

async fn import_companies(
    repo: &SqliteRepository,
    file: &Path,
) -> Result<()> {
    println!("Loading company pricing from: {}", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open: {}", file.display()))?;
    let records = CompanyPricingLoader::parse(reader)
        .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;
    println!("Parsed {} records from CSV", records.len());

    let stored = CompanyPricingLoader::load(repo, &records)
        .await
        .context("Failed to load company pricing into database")?;
    println!("Successfully stored pricing for {} companies.", stored);
    Ok(())
}

async fn export_filters(
    repo: &SqliteRepository,
    out_dir: &Path,
    purge: bool,
) -> Result<()> {
    let today = Utc::now().date_naive();
    match FilterExporter::export(repo, out_dir, today, purge).await {
        Ok(outcome) => {
            println!(
                "Exported {} filter records to {}",
                outcome.exported,
                outcome.path.display()
            );
            if let Some(purged) = outcome.purged {
                println!("Deleted {} exported records from the database.", purged);
            }
            Ok(())
        }
        Err(FilterExportError::Empty) => {
            println!("{}", FilterExportError::Empty);
            Ok(())
        }
        Err(e) => Err(e).context("Failed to export filter data"),
    }
}

async fn list_filters(
    repo: &SqliteRepository,
    query: UserFilterQuery,
) -> Result<()> {
    let page = repo
        .list_user_filters(&query)
        .await
        .context("Failed to fetch filter data")?;

    for record in &page.items {
        let filter = &record.filter;
        println!(
            "{}  {:<11}  {:<20}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            filter.page_type.as_str(),
            filter.user_id,
            filter.search_term
        );
    }
    println!(
        "Page {} of {} ({} records, {} per page)",
        page.current_page, page.total_pages, page.total_items, page.items_per_page
    );
    Ok(())
}

async fn filter_stats(repo: &SqliteRepository) -> Result<()> {
    let stats = repo
        .filter_statistics()
        .await
        .context("Failed to fetch filter statistics")?;

    println!("Total filter reports: {}", stats.total);
    println!("Last 24 hours:        {}", stats.last_24_hours);
    println!("By page type:");
    for (page_type, count) in &stats.by_page_type {
        println!("  {:<12} {}", page_type.as_str(), count);
    }
    println!("Top search terms:");
    for (term, count) in &stats.top_search_terms {
        println!("  {:<30} {}", term, count);
    }
    Ok(())
}

async fn list_quotes(repo: &SqliteRepository) -> Result<()> {
    let quotes = repo.list_quotes().await.context("Failed to list quotes")?;

    for quote in &quotes {
        let request = &quote.request;
        println!(
            "#{:<5} {}  {:<10} {:<9} {:>8} sq. ft.  ₹{:>12}  {} <{}>{}",
            quote.id,
            quote.created_at.format("%Y-%m-%d"),
            request.home_type.to_string(),
            request.package.as_str(),
            request.carpet_area,
            format_indian_grouping(request.estimated_cost),
            request.user_details.name,
            request.user_details.email,
            request
                .company_name
                .as_deref()
                .map(|name| format!("  via {name}"))
                .unwrap_or_default()
        );
    }
    println!("{} quotes", quotes.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let repo = open_repo(&args.database).await?;

    match args.command {
        Command::ImportCompanies { file } => import_companies(&repo, &file).await,
        Command::ExportFilters { out_dir, purge } => export_filters(&repo, &out_dir, purge).await,
        Command::ListFilters {
            page,
            limit,
            page_type,
            start,
            end,
        } => {
            let query = UserFilterQuery {
                page,
                limit,
                page_type,
                start,
                end,
            };
            list_filters(&repo, query).await
        }
        Command::FilterStats => filter_stats(&repo).await,
        Command::ListQuotes => list_quotes(&repo).await,
    }
}
