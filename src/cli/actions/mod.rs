pub mod classify;
pub mod session;

use crate::config::GateConfig;
use anyhow::Result;
use secrecy::SecretString;
use serde_json::Value;

#[derive(Debug)]
pub enum Action {
    Classify {
        paths: Vec<String>,
    },
    Navigate {
        config: GateConfig,
        cookies: Vec<SecretString>,
        paths: Vec<String>,
    },
    Login {
        config: GateConfig,
        email: String,
        password: SecretString,
        then: Vec<String>,
    },
    Register {
        config: GateConfig,
        data: Value,
    },
    Logout {
        config: GateConfig,
        cookies: Vec<SecretString>,
    },
}

impl Action {
    /// Runs the action and prints its JSON report to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built, login or register
    /// fail, or the report cannot be written.
    pub async fn execute(self) -> Result<()> {
        match self {
            Action::Classify { paths } => classify::handle(&paths),
            action => session::handle(action).await,
        }
    }
}
