//! reqwest-backed [`AuthApi`]. Every call shares one client so the session
//! cookie set by login is replayed on verification and logout, and every call
//! is bounded by the configured timeout.

use super::{
    AuthApi, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH, VERIFY_PATH,
    types::{ApiResponse, Session},
};
use crate::{APP_USER_AGENT, config::GateConfig, error::AuthError};
use reqwest::{Client, Response, cookie::Jar};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    client: Client,
    config: GateConfig,
}

impl HttpAuthApi {
    /// Builds a client with an empty cookie jar, user agent and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if the TLS backend cannot be initialized.
    pub fn new(config: GateConfig) -> Result<Self, AuthError> {
        Self::with_cookies(config, std::iter::empty::<&str>())
    }

    /// Like [`Self::new`], with the jar seeded from `name=value` cookies scoped
    /// to the API host, so an existing session can be resumed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if a cookie is not `name=value` or the
    /// client cannot be built.
    pub fn with_cookies<I, S>(config: GateConfig, cookies: I) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let jar = Jar::default();
        for cookie in cookies {
            let cookie = cookie.as_ref().trim();
            match cookie.split_once('=') {
                Some((name, _)) if !name.trim().is_empty() => {
                    jar.add_cookie_str(cookie, &config.api_base_url);
                }
                _ => {
                    return Err(AuthError::Config(
                        "Invalid session cookie, expected name=value".to_string(),
                    ));
                }
            }
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_provider(Arc::new(jar))
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AuthError::Config(format!("Error creating HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Response, AuthError> {
        let url = self.config.endpoint(path);
        debug!("POST {url}");

        let request = self.client.post(&url);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request.send().await?;
        ensure_success(response).await
    }
}

impl AuthApi for HttpAuthApi {
    #[instrument(skip(self))]
    async fn verify(&self) -> Result<Session, AuthError> {
        let url = self.config.endpoint(VERIFY_PATH);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        decode_json(response).await
    }

    #[instrument(skip_all)]
    async fn login(&self, credentials: &Value) -> Result<ApiResponse, AuthError> {
        let response = self.post_json(LOGIN_PATH, Some(credentials)).await?;
        let status = response.status().as_u16();
        let data = decode_json(response).await?;
        Ok(ApiResponse { status, data })
    }

    #[instrument(skip_all)]
    async fn register(&self, user_data: &Value) -> Result<Value, AuthError> {
        let response = self.post_json(REGISTER_PATH, Some(user_data)).await?;
        decode_optional_json(response).await
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), AuthError> {
        self.post_json(LOGOUT_PATH, None).await.map(drop)
    }
}

/// Turns non-2xx responses into classified errors with sanitized bodies.
async fn ensure_success(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AuthError::from_status(status.as_u16(), &body))
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    response
        .json::<T>()
        .await
        .map_err(|err| AuthError::Decode(format!("Failed to decode response: {err}")))
}

/// Decodes a JSON body, treating an empty body (e.g. 201/204) as `null`.
async fn decode_optional_json(response: Response) -> Result<Value, AuthError> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body)
        .map_err(|err| AuthError::Decode(format!("Failed to decode response: {err}")))
}
