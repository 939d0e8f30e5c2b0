//! Maps parsed CLI arguments to an [`Action`].

use crate::cli::actions::Action;
use crate::cli::commands::{
    ARG_API_URL, ARG_COOKIE, ARG_DATA, ARG_EMAIL, ARG_PASSWORD, ARG_PATHS, ARG_THEN, ARG_TIMEOUT,
    CMD_CLASSIFY, CMD_LOGIN, CMD_LOGOUT, CMD_NAVIGATE, CMD_REGISTER,
};
use crate::config::{DEFAULT_TIMEOUT, GateConfig};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use serde_json::Value;
use std::time::Duration;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the API URL is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_CLASSIFY, sub_m)) => Ok(Action::Classify {
            paths: many(sub_m, ARG_PATHS),
        }),
        Some((CMD_NAVIGATE, sub_m)) => Ok(Action::Navigate {
            config: gate_config(matches)?,
            cookies: secrets(sub_m, ARG_COOKIE),
            paths: many(sub_m, ARG_PATHS),
        }),
        Some((CMD_LOGIN, sub_m)) => Ok(Action::Login {
            config: gate_config(matches)?,
            email: sub_m
                .get_one::<String>(ARG_EMAIL)
                .cloned()
                .context("missing required argument: --email")?,
            password: sub_m
                .get_one::<String>(ARG_PASSWORD)
                .map(|password| SecretString::from(password.clone()))
                .context("missing required argument: --password")?,
            then: many(sub_m, ARG_THEN),
        }),
        Some((CMD_REGISTER, sub_m)) => Ok(Action::Register {
            config: gate_config(matches)?,
            data: sub_m
                .get_one::<Value>(ARG_DATA)
                .cloned()
                .context("missing required argument: --data")?,
        }),
        Some((CMD_LOGOUT, sub_m)) => Ok(Action::Logout {
            config: gate_config(matches)?,
            cookies: secrets(sub_m, ARG_COOKIE),
        }),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

fn gate_config(matches: &ArgMatches) -> Result<GateConfig> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .context("missing required argument: --api-url")?;
    let timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT.as_secs());

    let config = GateConfig::new(api_url).context("invalid SESSION_GATE_API_URL")?;
    Ok(config.with_timeout(Duration::from_secs(timeout)))
}

fn many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn secrets(matches: &ArgMatches, id: &str) -> Vec<SecretString> {
    many(matches, id).into_iter().map(SecretString::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    fn cleared_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        temp_env::with_vars(
            [
                ("SESSION_GATE_API_URL", None::<&str>),
                ("SESSION_GATE_TIMEOUT_SECONDS", None::<&str>),
                ("SESSION_GATE_EMAIL", None::<&str>),
                ("SESSION_GATE_PASSWORD", None::<&str>),
                ("SESSION_GATE_COOKIE", None::<&str>),
            ],
            f,
        )
    }

    #[test]
    fn classify_does_not_need_api_url() -> Result<()> {
        cleared_env(|| {
            let matches =
                commands::new().try_get_matches_from(vec!["session-gate", "classify", "/orders"])?;
            match handler(&matches)? {
                Action::Classify { paths } => assert_eq!(paths, vec!["/orders"]),
                other => panic!("unexpected action: {other:?}"),
            }
            Ok(())
        })
    }

    #[test]
    fn api_url_required_for_network_commands() {
        cleared_env(|| {
            let matches = commands::new().get_matches_from(vec!["session-gate", "logout"]);
            let result = handler(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(
                    err.to_string()
                        .contains("missing required argument: --api-url")
                );
            }
        });
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        cleared_env(|| {
            let matches = commands::new().get_matches_from(vec![
                "session-gate",
                "logout",
                "--api-url",
                "ftp://api.example.test",
            ]);
            assert!(handler(&matches).is_err());
        });
    }

    #[test]
    fn login_builds_config_and_secret() -> Result<()> {
        cleared_env(|| {
            let matches = commands::new().try_get_matches_from(vec![
                "session-gate",
                "--api-url",
                "https://api.example.test",
                "--timeout",
                "4",
                "login",
                "--email",
                "a@x.com",
                "--password",
                "hunter2",
                "--then",
                "/dashboard",
                "/orders",
            ])?;

            match handler(&matches)? {
                Action::Login {
                    config,
                    email,
                    password,
                    then,
                } => {
                    assert_eq!(config.api_base_url.as_str(), "https://api.example.test/");
                    assert_eq!(config.request_timeout, Duration::from_secs(4));
                    assert_eq!(email, "a@x.com");
                    assert_eq!(password.expose_secret(), "hunter2");
                    assert_eq!(then, vec!["/dashboard", "/orders"]);
                }
                other => panic!("unexpected action: {other:?}"),
            }
            Ok(())
        })
    }

    #[test]
    fn logout_carries_session_cookies() -> Result<()> {
        cleared_env(|| {
            let matches = commands::new().try_get_matches_from(vec![
                "session-gate",
                "--api-url",
                "https://api.example.test",
                "logout",
                "--cookie",
                "sid=4f1c2e",
            ])?;

            match handler(&matches)? {
                Action::Logout { config, cookies } => {
                    assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
                    let cookies: Vec<&str> =
                        cookies.iter().map(|cookie| cookie.expose_secret()).collect();
                    assert_eq!(cookies, vec!["sid=4f1c2e"]);
                }
                other => panic!("unexpected action: {other:?}"),
            }
            Ok(())
        })
    }

    #[test]
    fn register_carries_json_payload() -> Result<()> {
        cleared_env(|| {
            let matches = commands::new().try_get_matches_from(vec![
                "session-gate",
                "register",
                "--api-url",
                "http://127.0.0.1:8080",
                "--data",
                r#"{"name":"E"}"#,
            ])?;

            match handler(&matches)? {
                Action::Register { data, .. } => {
                    assert_eq!(data, serde_json::json!({ "name": "E" }));
                }
                other => panic!("unexpected action: {other:?}"),
            }
            Ok(())
        })
    }
}
