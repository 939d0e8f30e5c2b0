//! Network-backed actions. Each run builds one gate so the cookie jar carries
//! the session from login into any follow-up navigation.

use crate::{
    api::{AuthApi, client::HttpAuthApi},
    cli::actions::{Action, classify},
    config::GateConfig,
    gate::{
        LogoutReport, NavigationOutcome, SessionGate, navigator::MemoryNavigator, state::AuthState,
    },
};
use anyhow::{Context, Result, bail};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Step {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Step {
    #[must_use]
    pub fn navigation(path: &str, outcome: &NavigationOutcome) -> Self {
        let (label, error) = match outcome {
            NavigationOutcome::Public => ("public", None),
            NavigationOutcome::Verified(_) => ("verified", None),
            NavigationOutcome::Redirected(err) => {
                ("redirected", Some(format!("{}: {err}", err.kind())))
            }
            NavigationOutcome::Superseded => ("superseded", None),
            NavigationOutcome::Unchanged => ("unchanged", None),
        };

        Self {
            action: "navigate",
            path: Some(path.to_string()),
            outcome: label.to_string(),
            error,
        }
    }

    #[must_use]
    pub fn logout(report: &LogoutReport) -> Self {
        let outcome = if report.is_logged_out() {
            "logged_out"
        } else {
            "failed"
        };

        Self {
            action: "logout",
            path: None,
            outcome: outcome.to_string(),
            error: report.error().map(|err| format!("{}: {err}", err.kind())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: Vec<Step>,
    pub redirects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    pub state: AuthState,
}

/// Visits `paths` in order through the router entry point.
pub async fn navigate_all<A: AuthApi>(
    gate: &SessionGate<A, MemoryNavigator>,
    paths: &[String],
) -> Vec<Step> {
    let mut steps = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = gate.navigate(path).await;
        steps.push(Step::navigation(path, &outcome));
    }
    steps
}

/// Collects the redirects and final state of `gate` into a report.
pub fn finish<A: AuthApi>(
    gate: &SessionGate<A, MemoryNavigator>,
    steps: Vec<Step>,
    response: Option<Value>,
) -> Report {
    Report {
        steps,
        redirects: gate.navigator().take(),
        response,
        state: gate.state(),
    }
}

fn build_gate(
    config: GateConfig,
    cookies: &[SecretString],
) -> Result<SessionGate<HttpAuthApi, MemoryNavigator>> {
    let api = HttpAuthApi::with_cookies(config, cookies.iter().map(|c| c.expose_secret()))
        .context("failed to build API client")?;
    Ok(SessionGate::new(api, MemoryNavigator::new()))
}

/// Runs a network-backed action against a fresh gate and collects its report.
///
/// # Errors
///
/// Returns an error if the client cannot be built, login or register fail, or
/// the action does not talk to the API.
pub async fn run(action: Action) -> Result<Report> {
    let report = match action {
        Action::Classify { .. } => bail!("classify does not open a session"),
        Action::Navigate {
            config,
            cookies,
            paths,
        } => {
            let gate = build_gate(config, &cookies)?;
            let steps = navigate_all(&gate, &paths).await;
            finish(&gate, steps, None)
        }
        Action::Login {
            config,
            email,
            password,
            then,
        } => {
            let gate = build_gate(config, &[])?;
            let credentials = json!({
                "email": email,
                "password": password.expose_secret(),
            });
            let response = gate.login(&credentials).await.context("login failed")?;

            let mut steps = vec![Step {
                action: "login",
                path: None,
                outcome: format!("status {}", response.status),
                error: None,
            }];
            steps.extend(navigate_all(&gate, &then).await);
            finish(&gate, steps, None)
        }
        Action::Register { config, data } => {
            let gate = build_gate(config, &[])?;
            let registered = gate.register(&data).await.context("registration failed")?;
            let steps = vec![Step {
                action: "register",
                path: None,
                outcome: "registered".to_string(),
                error: None,
            }];
            finish(&gate, steps, Some(registered))
        }
        Action::Logout { config, cookies } => {
            let gate = build_gate(config, &cookies)?;
            let logout = gate.logout().await;
            if let Some(err) = logout.error() {
                warn!("logout did not complete, session kept: {err}");
            }
            finish(&gate, vec![Step::logout(&logout)], None)
        }
    };

    Ok(report)
}

/// Handle the navigate, login, register and logout actions
///
/// # Errors
///
/// Returns an error if [`run`] fails or the report cannot be serialized.
pub async fn handle(action: Action) -> Result<()> {
    if let Action::Classify { paths } = action {
        return classify::handle(&paths);
    }

    let report = run(action).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
