//! Wiring for the terminal estimator: storage, remote services, saved
//! drafts and the company a session is opened for.

use std::path::Path;

use anyhow::{Context, Result};
use estimator_core::db::RepositoryRegistry;
use estimator_core::models::{CompanyContext, RequestOrigin, UserFilter};
use estimator_core::services::{
    LocalQuoteDesk, PricingSource, QuoteGateway, UserFilterSink, log_filter,
};
use estimator_core::wizard::WizardDraft;
use estimator_core::{EstimatorSession, SessionOptions};
use estimator_db_sqlite::SqliteRepositoryFactory;
use estimator_http::{ApiConfig, HttpClient};
use tracing::{debug, info};

use crate::config::Settings;
use crate::prompter::Prompter;
use crate::wizard::{Outcome, WizardDriver};

/// Every storage backend this binary can open.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Where pricing comes from and where quotes and filter reports go.
pub enum Services {
    Remote(HttpClient),
    Local(LocalQuoteDesk),
}

impl Services {
    pub fn remote(config: ApiConfig) -> Result<Self> {
        let base_url = config.base_url.clone();
        let client = HttpClient::new(config).context("Failed to build HTTP client")?;
        info!(%base_url, "using remote marketplace API");
        Ok(Self::Remote(client))
    }

    /// Opens the configured repository and serves everything from it.
    pub async fn local(settings: &Settings) -> Result<Self> {
        let db_config = settings.db_config();
        debug!(backend = %db_config.backend, "connecting to local store");
        let repo = build_registry()
            .create(&db_config)
            .await
            .with_context(|| format!("Failed to open database: {}", db_config.connection_string))?;
        let origin = RequestOrigin {
            ip_address: None,
            user_agent: Some(ApiConfig::default().user_agent),
        };
        info!(database = %db_config.connection_string, "using local store");
        Ok(Self::Local(LocalQuoteDesk::new(repo).with_origin(origin)))
    }

    pub fn pricing(&self) -> &dyn PricingSource {
        match self {
            Self::Remote(client) => client,
            Self::Local(desk) => desk,
        }
    }

    pub fn gateway(&self) -> &dyn QuoteGateway {
        match self {
            Self::Remote(client) => client,
            Self::Local(desk) => desk,
        }
    }

    pub fn filters(&self) -> &dyn UserFilterSink {
        match self {
            Self::Remote(client) => client,
            Self::Local(desk) => desk,
        }
    }
}

pub fn load_company_context(path: &Path) -> Result<CompanyContext> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read company context: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid company context: {}", path.display()))
}

/// The saved draft, or `None` when there is no file yet.
pub fn load_draft(path: &Path) -> Result<Option<WizardDraft>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read draft: {}", path.display()));
        }
    };
    let draft = serde_json::from_str(&text)
        .with_context(|| format!("Invalid draft: {}", path.display()))?;
    Ok(Some(draft))
}

pub fn save_draft(
    path: &Path,
    draft: &WizardDraft,
) -> Result<()> {
    let json = serde_json::to_string_pretty(draft).context("Failed to serialize draft")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write draft: {}", path.display()))
}

/// Removes a draft that has been picked up. A missing file is fine.
pub fn discard_draft(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            Err(e).with_context(|| format!("Failed to remove draft: {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Builds a session, resuming `draft` when given, and loads pricing.
pub async fn start_session(
    services: &Services,
    context: Option<CompanyContext>,
    draft: Option<WizardDraft>,
    options: SessionOptions,
) -> EstimatorSession {
    let mut session = match draft {
        Some(draft) => {
            info!("resuming saved draft");
            EstimatorSession::resume(draft, context, options)
        }
        None => EstimatorSession::new(context, options),
    };
    session.start(services.pricing()).await;
    session
}

/// Runs one interactive session. A draft saved on the way out is written
/// to `draft_path`; a finished run removes any earlier draft there.
pub async fn run_wizard<P: Prompter>(
    services: &Services,
    prompter: &mut P,
    mut session: EstimatorSession,
    draft_path: &Path,
) -> Result<Outcome> {
    prompter.show("Interior cost estimator");
    if let Some(company) = session.company() {
        prompter.show(&format!("Estimating with {}", company.company_name));
    }

    let outcome = WizardDriver::new(prompter, services.gateway())
        .run(&mut session)
        .await?;

    match &outcome {
        Outcome::SavedDraft { draft, .. } => {
            save_draft(draft_path, draft)?;
            prompter.show(&format!("Draft saved to {}", draft_path.display()));
        }
        Outcome::Quit { submitted } if *submitted > 0 => discard_draft(draft_path)?,
        Outcome::Quit { .. } => {}
    }
    Ok(outcome)
}

/// Reports one filter usage record read from a JSON file.
pub async fn report_filter(
    services: &Services,
    path: &Path,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter report: {}", path.display()))?;
    let filter: UserFilter = serde_json::from_str(&text)
        .with_context(|| format!("Invalid filter report: {}", path.display()))?;
    log_filter(services.filters(), &filter).await;
    Ok(())
}
