//! Client configuration for the auth API. Values here are public; credentials
//! never pass through this module.

use crate::error::AuthError;
use std::time::Duration;
use url::Url;

/// Default request timeout applied to every API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
}

impl GateConfig {
    /// Validates the API base URL and applies the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if the URL is empty, malformed, or not http(s).
    pub fn new(api_base_url: &str) -> Result<Self, AuthError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins an endpoint path onto the base URL, tolerating missing or
    /// duplicated slashes on either side.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        build_url_with_base(self.api_base_url.as_str(), path)
    }
}

fn parse_base_url(value: &str) -> Result<Url, AuthError> {
    let trimmed = normalize_value(value)
        .ok_or_else(|| AuthError::Config("API base URL is not configured.".to_string()))?;

    let url = Url::parse(&trimmed)
        .map_err(|err| AuthError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AuthError::Config(format!(
            "Unsupported API base URL scheme: {scheme}"
        ))),
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
