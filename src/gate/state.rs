use crate::api::types::Session;
use serde::Serialize;

/// Snapshot of the consumer-facing auth state.
///
/// A gate starts as `{ user: None, loading: true }` and publishes a new snapshot
/// whenever either field changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<Session>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}
