//! Client configuration.

use crate::error::ClientError;

/// Where and how to reach the report server's REST dispatcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST dispatcher, without a trailing slash.
    pub base_url: String,
    /// HTTP timeout applied to every request.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/ibi_apps/rs".to_string(),
            timeout_secs: 30,
            user_agent: concat!("ibirs-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// `IBIRS_BASE_URL` overrides the dispatcher URL and `IBIRS_TIMEOUT_SECS`
    /// the request timeout.
    pub fn from_env() -> Result<Self, ClientError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("IBIRS_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(raw) = std::env::var("IBIRS_TIMEOUT_SECS") {
            config.timeout_secs = raw.parse().map_err(|_| {
                ClientError::Config(format!("IBIRS_TIMEOUT_SECS is not a number: {raw:?}"))
            })?;
        }
        Ok(config)
    }
}
