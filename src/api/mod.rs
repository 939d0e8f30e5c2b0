//! Transport seam between the session gate and the remote auth API.
//!
//! `SessionGate` only talks to the API through [`AuthApi`], so tests can swap in
//! an in-memory implementation while production code uses [`client::HttpAuthApi`].

pub mod client;
pub mod types;

use crate::error::AuthError;
use serde_json::Value;
use std::future::Future;
use types::{ApiResponse, Session};

/// Verification ("who am I") endpoint, relative to the API base.
pub const VERIFY_PATH: &str = "v1/user/";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Remote auth API used by the gate. Each call is a single attempt; any non-2xx
/// answer is an `Err`.
pub trait AuthApi: Send + Sync {
    /// `GET v1/user/`: confirms the current session and returns its user.
    fn verify(&self) -> impl Future<Output = Result<Session, AuthError>> + Send;

    /// `POST /auth/login` with the caller's credentials.
    fn login(&self, credentials: &Value)
        -> impl Future<Output = Result<ApiResponse, AuthError>> + Send;

    /// `POST /auth/register` with the caller's user data; returns the response body.
    fn register(&self, user_data: &Value)
        -> impl Future<Output = Result<Value, AuthError>> + Send;

    /// `POST /auth/logout` without a body.
    fn logout(&self) -> impl Future<Output = Result<(), AuthError>> + Send;
}
