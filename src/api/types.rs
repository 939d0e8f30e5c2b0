//! Request and response types for the auth API. Login and register payloads may
//! carry passwords or tokens, so only the `Session` identity is ever logged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// User identifier as returned by the API, numeric or opaque string.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(formatter, "{id}"),
            UserId::Text(id) => formatter.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

/// Minimal identity of the signed-in user. Extra response fields are dropped.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Raw API response handed back to callers of `login`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}
