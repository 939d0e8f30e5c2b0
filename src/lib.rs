//! # Session Gate (route-gated session bootstrapping)
//!
//! `session-gate` keeps the client-side view of "who is signed in" for a web
//! front end and decides, per navigation, whether that view has to be
//! confirmed against the API before a route may render.
//!
//! ## Route Gating
//!
//! A fixed set of path prefixes (`/userprofile`, `/dashboard`, `/settings`,
//! `/my-account`, `/orders`) marks protected routes. Entering one issues a
//! `GET v1/user/` verification call:
//!
//! - **Success:** the returned `{ id, name, email }` record becomes the session.
//! - **Failure:** of any kind clears the session and redirects to `/login`.
//!
//! Public routes never touch the network and leave any held session in place.
//!
//! ## Actions
//!
//! `login`, `register` and `logout` proxy to `/auth/*` and mirror the outcome
//! into the local session. Login and register errors propagate to the caller;
//! logout errors are reported but never fatal.
//!
//! ## Navigation Generations
//!
//! Each navigation takes a new generation number. A verification that resolves
//! after a newer navigation started is discarded, so a slow response for an old
//! path can never overwrite state owned by the current one.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub use api::{AuthApi, client::HttpAuthApi, types::{ApiResponse, Session, UserId}};
pub use config::GateConfig;
pub use error::{AuthError, ErrorKind};
pub use gate::{
    LogoutReport, NavigationOutcome, SessionGate,
    navigator::{MemoryNavigator, Navigator},
    routes::{PROTECTED_PREFIXES, classify},
    state::AuthState,
};
