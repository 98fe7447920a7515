use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use estimator_cli::app::{self, Services};
use estimator_cli::config::Settings;
use estimator_cli::logging;
use estimator_cli::prompter::TerminalPrompter;
use estimator_cli::wizard::Outcome;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Interior design cost estimator.
///
/// Walks through scope, home type, rooms, package and contact details,
/// shows the estimated cost and submits a quote request.
#[derive(Debug, Parser)]
#[command(name = "estimator", version)]
struct Cli {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Marketplace API base URL (overrides the settings file).
    #[arg(long)]
    api_url: Option<String>,

    /// Use the local database instead of the marketplace API.
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Database backend for --offline.
    #[arg(long)]
    backend: Option<String>,

    /// Database connection string for --offline.
    /// For SQLite this is a file path (e.g. `estimator.db`) or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// JSON file describing the company the estimate is for
    /// (`{"companyId", "companyName", "priceData"}`).
    #[arg(long)]
    company_context: Option<PathBuf>,

    /// Where an unfinished estimate is saved and resumed from.
    #[arg(long, default_value = "estimator-draft.json")]
    draft: PathBuf,

    /// Start with an empty form even if a draft exists.
    #[arg(long, default_value_t = false)]
    fresh: bool,

    /// Log at debug level.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report one search/filter usage record from a JSON file.
    ReportFilter { file: PathBuf },
}

impl Cli {
    fn apply_overrides(
        &self,
        settings: &mut Settings,
    ) {
        if let Some(url) = &self.api_url {
            settings.api.base_url = Some(url.clone());
        }
        if let Some(backend) = &self.backend {
            settings.database.backend = backend.clone();
        }
        if let Some(db) = &self.db {
            settings.database.connection = db.clone();
        }
    }
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn init_logging(
    settings: &Settings,
    verbose: bool,
) -> Result<()> {
    logging::init_logging(&settings.logging.level);
    if verbose {
        logging::set_log_level("debug")?;
    }
    if let Some(file) = &settings.logging.file {
        logging::enable_file_logging(file)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

async fn connect(
    cli: &Cli,
    settings: &Settings,
) -> Result<Services> {
    if cli.offline {
        Services::local(settings).await
    } else {
        Services::remote(settings.api_config())
    }
}

async fn estimate(
    cli: &Cli,
    settings: &Settings,
    services: &Services,
) -> Result<()> {
    let context = cli
        .company_context
        .as_deref()
        .map(app::load_company_context)
        .transpose()?;
    let draft = if cli.fresh {
        None
    } else {
        app::load_draft(&cli.draft)?
    };

    println!("Loading company pricing…");
    let session = app::start_session(services, context, draft, settings.session).await;

    let mut prompter = TerminalPrompter::new();
    let outcome = app::run_wizard(services, &mut prompter, session, &cli.draft).await?;
    match outcome {
        Outcome::Quit { submitted } | Outcome::SavedDraft { submitted, .. } => {
            info!(submitted, "estimator closed");
        }
    }
    Ok(())
}

fn settings_path(cli: &Cli) -> Option<&Path> {
    cli.config.as_deref()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_optional(settings_path(&cli))?;
    cli.apply_overrides(&mut settings);
    init_logging(&settings, cli.verbose).context("Failed to set up logging")?;
    debug!(?settings, "settings loaded");

    let services = connect(&cli, &settings).await?;

    match &cli.command {
        Some(Command::ReportFilter { file }) => app::report_filter(&services, file).await,
        None => estimate(&cli, &settings, &services).await,
    }
}
