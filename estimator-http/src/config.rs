use std::time::Duration;

/// Where the marketplace API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and optional port; no trailing `/api`.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    pub fn endpoint(
        &self,
        path: &str,
    ) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: concat!("estimator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
