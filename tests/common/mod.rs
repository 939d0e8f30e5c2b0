//! Axum mock of the auth API used by the HTTP integration tests.
//!
//! Each test starts its own server on an ephemeral port, so tests can run in
//! parallel without sharing cookies or counters.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::net::TcpListener;

pub const SESSION_COOKIE: &str = "sid=4f1c2e";
pub const PASSWORD: &str = "correct horse";
pub const TAKEN_EMAIL: &str = "taken@x.com";

#[derive(Default)]
pub struct MockState {
    pub verify_calls: AtomicUsize,
    pub logout_fails: AtomicBool,
    pub verify_delay_ms: AtomicUsize,
}

impl MockState {
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|cookies| cookies.split(';').any(|cookie| cookie.trim() == SESSION_COOKIE))
}

async fn verify(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.verify_calls.fetch_add(1, Ordering::SeqCst);

    let delay = state.verify_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay as u64)).await;
    }

    if has_session(&headers) {
        Json(json!({ "id": 2, "name": "B", "email": "b@x.com", "roles": ["user"] })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "not authenticated").into_response()
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body.get("password").and_then(Value::as_str) != Some(PASSWORD) {
        return (StatusCode::UNAUTHORIZED, "invalid credentials").into_response();
    }

    let email = body.get("email").cloned().unwrap_or(Value::Null);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
        Json(json!({ "id": 2, "name": "B", "email": email, "token": "t" })),
    )
        .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    if email == TAKEN_EMAIL {
        return (StatusCode::CONFLICT, "email already registered").into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "id": 7, "email": email, "verified": false })),
    )
        .into_response()
}

async fn logout(State(state): State<Arc<MockState>>) -> Response {
    if state.logout_fails.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "  logout backend unavailable  ")
            .into_response();
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, "sid=; Path=/; Max-Age=0")],
    )
        .into_response()
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/v1/user/", get(verify))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .with_state(state)
}

/// Starts the mock API and returns its base URL with the shared state.
pub async fn spawn_api() -> anyhow::Result<(String, Arc<MockState>)> {
    let state = Arc::new(MockState::default());
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let app = router(Arc::clone(&state));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });

    Ok((format!("http://{addr}"), state))
}
