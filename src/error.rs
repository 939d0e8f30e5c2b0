use std::fmt;
use thiserror::Error;

/// Maximum number of error body characters kept in an error message.
pub const MAX_ERROR_CHARS: usize = 200;

/// Coarse classification of an [`AuthError`], for callers that want to react
/// differently to an expired session, an unreachable API or a broken server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Rejected,
    ServerError,
    NetworkFailure,
    Decode,
    Encode,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Rejected => "rejected",
            ErrorKind::ServerError => "server_error",
            ErrorKind::NetworkFailure => "network_failure",
            ErrorKind::Decode => "decode",
            ErrorKind::Encode => "encode",
            ErrorKind::Config => "config",
        };
        formatter.write_str(name)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Response error: {0}")]
    Decode(String),

    #[error("Request error: {0}")]
    Encode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl AuthError {
    /// Builds the error for a non-2xx response, sanitizing the body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = sanitize_body(body);
        match status {
            401 | 403 => AuthError::Unauthorized { status, message },
            500..=599 => AuthError::Server { status, message },
            _ => AuthError::Rejected { status, message },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthorized { .. } => ErrorKind::Unauthorized,
            AuthError::Rejected { .. } => ErrorKind::Rejected,
            AuthError::Server { .. } => ErrorKind::ServerError,
            AuthError::Network(_) | AuthError::Timeout(_) => ErrorKind::NetworkFailure,
            AuthError::Decode(_) => ErrorKind::Decode,
            AuthError::Encode(_) => ErrorKind::Encode,
            AuthError::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status of the failed response, if the API answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Unauthorized { status, .. }
            | AuthError::Rejected { status, .. }
            | AuthError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_decode() {
            AuthError::Decode(format!("Failed to decode response: {err}"))
        } else if err.is_builder() {
            AuthError::Config(format!("Failed to build request: {err}"))
        } else {
            AuthError::Network(format!("Unable to reach the server: {err}"))
        }
    }
}

/// Trims and truncates an HTTP error body for use in a user-facing message.
#[must_use]
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
