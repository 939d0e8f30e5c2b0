//! Session gate: route classification plus the client-side session it guards.
//!
//! The gate owns the only copy of the current session and the loading flag.
//! Consumers read them through [`SessionGate::state`] or a `watch` subscription
//! and change them only through navigation and the login / register / logout
//! actions. Route checks are a UX concern; the API still enforces access.

pub mod navigator;
pub mod routes;
pub mod state;

use crate::{
    api::{
        AuthApi,
        types::{ApiResponse, Session},
    },
    error::AuthError,
};
use navigator::Navigator;
use routes::paths;
use serde::Serialize;
use serde_json::Value;
use state::AuthState;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Which branch a navigation took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Unprotected route: no verification, session untouched.
    Public,
    /// Protected route and the API confirmed the session.
    Verified(Session),
    /// Protected route and verification failed: session cleared, sent to `/login`.
    Redirected(AuthError),
    /// Verification resolved after a newer navigation or action; result dropped.
    Superseded,
    /// Same path as the current one; nothing ran.
    Unchanged,
}

/// Result of [`SessionGate::logout`]. A failure is reported, never raised.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum LogoutReport {
    LoggedOut,
    Failed(AuthError),
}

impl LogoutReport {
    pub fn is_logged_out(&self) -> bool {
        matches!(self, LogoutReport::LoggedOut)
    }

    pub fn error(&self) -> Option<&AuthError> {
        match self {
            LogoutReport::LoggedOut => None,
            LogoutReport::Failed(err) => Some(err),
        }
    }
}

pub struct SessionGate<A, N> {
    api: A,
    navigator: N,
    state: watch::Sender<AuthState>,
    generation: AtomicU64,
    current_path: Mutex<Option<String>>,
}

impl<A: AuthApi, N: Navigator> SessionGate<A, N> {
    /// Creates a gate in the unknown state: no user, loading.
    pub fn new(api: A, navigator: N) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api,
            navigator,
            state,
            generation: AtomicU64::new(0),
            current_path: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Current `{ user, loading }` snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. Identical snapshots are not re-published.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn user(&self) -> Option<Session> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_protected(&self, path: &str) -> bool {
        routes::is_protected(path)
    }

    /// Router entry point: runs [`Self::on_navigate`] once per distinct path.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        {
            let mut current = self
                .current_path
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if current.as_deref() == Some(path) {
                return NavigationOutcome::Unchanged;
            }
            *current = Some(path.to_string());
        }

        self.on_navigate(path).await
    }

    /// Gates `path`: public routes settle immediately, protected routes are
    /// verified against the API. Only the newest navigation may commit.
    pub async fn on_navigate(&self, path: &str) -> NavigationOutcome {
        let generation = self.next_generation();

        if !routes::is_protected(path) {
            debug!(path, "public route, skipping session check");
            self.publish(|state| state.loading = false);
            return NavigationOutcome::Public;
        }

        debug!(path, "protected route, verifying session");
        self.publish(|state| state.loading = true);

        let pending = PendingCheck {
            state: &self.state,
            generation: &self.generation,
            mine: generation,
            armed: true,
        };
        let result = self.api.verify().await;
        pending.disarm();

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(path, "session check superseded by a newer navigation");
            return NavigationOutcome::Superseded;
        }

        match result {
            Ok(session) => {
                let user = session.clone();
                self.publish(move |state| {
                    state.user = Some(user);
                    state.loading = false;
                });
                NavigationOutcome::Verified(session)
            }
            Err(err) => {
                error!(path, kind = %err.kind(), "Authentication check failed: {err}");
                self.publish(|state| {
                    state.user = None;
                    state.loading = false;
                });
                self.navigator.push(paths::LOGIN);
                NavigationOutcome::Redirected(err)
            }
        }
    }

    /// Logs in and stores `{ id, name, email }` from the response. Returns the
    /// raw response; on error the current session is left as it was.
    ///
    /// # Errors
    ///
    /// Propagates encode, transport, HTTP and decode failures.
    pub async fn login<C>(&self, credentials: &C) -> Result<ApiResponse, AuthError>
    where
        C: Serialize + ?Sized,
    {
        let payload = encode(credentials)?;

        let response = self.api.login(&payload).await.map_err(|err| {
            error!(kind = %err.kind(), "Login failed: {err}");
            err
        })?;

        let session: Session = serde_json::from_value(response.data.clone()).map_err(|err| {
            let err = AuthError::Decode(format!("Login response is missing user fields: {err}"));
            error!("Login failed: {err}");
            err
        })?;

        info!(user_id = %session.id, "Login successful");
        self.next_generation();
        self.publish(move |state| {
            state.user = Some(session);
            state.loading = false;
        });

        Ok(response)
    }

    /// Registers a user, then redirects to `/login`. The session is untouched.
    ///
    /// # Errors
    ///
    /// Propagates encode, transport, HTTP and decode failures.
    pub async fn register<U>(&self, user_data: &U) -> Result<Value, AuthError>
    where
        U: Serialize + ?Sized,
    {
        let payload = encode(user_data)?;

        let data = self.api.register(&payload).await.map_err(|err| {
            error!(kind = %err.kind(), "Registration failed: {err}");
            err
        })?;

        info!("Registration successful");
        self.navigator.push(paths::LOGIN);
        Ok(data)
    }

    /// Logs out. On success the session is cleared and `/login` pushed; on
    /// failure nothing changes and the error comes back in the report.
    pub async fn logout(&self) -> LogoutReport {
        match self.api.logout().await {
            Ok(()) => {
                info!("Logout successful");
                self.next_generation();
                self.publish(|state| {
                    state.user = None;
                    state.loading = false;
                });
                self.navigator.push(paths::LOGIN);
                LogoutReport::LoggedOut
            }
            Err(err) => {
                error!(kind = %err.kind(), "Logout failed: {err}");
                LogoutReport::Failed(err)
            }
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn publish(&self, update: impl FnOnce(&mut AuthState)) {
        self.state.send_if_modified(|state| {
            let before = state.clone();
            update(state);
            *state != before
        });
    }
}

/// Held across a verification. If the navigation is dropped before the check
/// resolves while it is still the newest one, the drop settles `loading`.
struct PendingCheck<'a> {
    state: &'a watch::Sender<AuthState>,
    generation: &'a AtomicU64,
    mine: u64,
    armed: bool,
}

impl PendingCheck<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingCheck<'_> {
    fn drop(&mut self) {
        if self.armed && self.generation.load(Ordering::SeqCst) == self.mine {
            debug!("session check dropped before completing, settling loading flag");
            self.state.send_if_modified(|state| {
                let was_loading = state.loading;
                state.loading = false;
                was_loading
            });
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Value, AuthError> {
    serde_json::to_value(value)
        .map_err(|err| AuthError::Encode(format!("Failed to encode request: {err}")))
}
