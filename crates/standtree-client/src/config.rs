//! Client configuration loaded from environment or built explicitly.

use thiserror::Error;

/// Configuration for the backend collaborator client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the CRM backend, e.g. `https://crm.example.com/api`.
    pub base_url: String,
    /// Bearer token, when the deployment requires one.
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no backend configured. Set STANDTREE_API_URL")]
    MissingBaseUrl,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_string());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("STANDTREE_API_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        if base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let timeout_secs = match std::env::var("STANDTREE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("STANDTREE_TIMEOUT_SECS: {raw:?}")))?,
            Err(_) => 30,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: std::env::var("STANDTREE_API_TOKEN").ok(),
            timeout_secs,
        })
    }
}
