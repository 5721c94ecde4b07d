use reqwest::Url;

use crate::error::ApiError;

/// Base URL used when neither the command line nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable that overrides [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "KHUB_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL including the `/api/v1` prefix, without trailing slash
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/').to_string();
        Url::parse(&trimmed).map_err(|_| ApiError::InvalidUrl(raw.clone()))?;
        Ok(Self { base_url: trimmed })
    }

    /// Resolve the base URL: explicit value first, then `KHUB_API_URL`, then the default.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ApiError> {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::resolve_with(explicit, from_env.as_deref())
    }

    fn resolve_with(explicit: Option<&str>, from_env: Option<&str>) -> Result<Self, ApiError> {
        let url = explicit
            .filter(|s| !s.trim().is_empty())
            .or(from_env.filter(|s| !s.trim().is_empty()))
            .unwrap_or(DEFAULT_API_URL);
        Self::new(url)
    }

    /// Join an endpoint path (e.g. `/hubs`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
