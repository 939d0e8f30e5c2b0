pub mod logging;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::{
        ValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};
use serde_json::Value;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_PATHS: &str = "paths";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_THEN: &str = "then";
pub const ARG_DATA: &str = "data";
pub const ARG_COOKIE: &str = "cookie";

pub const CMD_CLASSIFY: &str = "classify";
pub const CMD_NAVIGATE: &str = "navigate";
pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGOUT: &str = "logout";

#[must_use]
pub fn validator_json() -> ValueParser {
    ValueParser::from(move |raw: &str| -> std::result::Result<Value, String> {
        serde_json::from_str::<Value>(raw).map_err(|err| format!("invalid JSON: {err}"))
    })
}

fn paths_arg(help: &'static str) -> Arg {
    Arg::new(ARG_PATHS)
        .help(help)
        .required(true)
        .num_args(1..)
        .action(ArgAction::Append)
}

fn cookie_arg() -> Arg {
    Arg::new(ARG_COOKIE)
        .short('c')
        .long("cookie")
        .help("Session cookie to resume, as name=value; repeat for several cookies")
        .env("SESSION_GATE_COOKIE")
        .hide_env_values(true)
        .action(ArgAction::Append)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("session-gate")
        .about("Route-gated session bootstrapping")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .short('u')
                .long("api-url")
                .help("Auth API base URL, example: https://api.example.com")
                .env("SESSION_GATE_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .env("SESSION_GATE_TIMEOUT_SECONDS")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .subcommand(
            Command::new(CMD_CLASSIFY)
                .about("Report whether paths are protected, without calling the API")
                .arg(paths_arg("Paths to classify")),
        )
        .subcommand(
            Command::new(CMD_NAVIGATE)
                .about("Navigate through paths in order, verifying the session on protected routes")
                .arg(paths_arg("Paths to visit"))
                .arg(cookie_arg()),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Log in, then optionally navigate")
                .arg(
                    Arg::new(ARG_EMAIL)
                        .short('e')
                        .long("email")
                        .help("Account email")
                        .env("SESSION_GATE_EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("SESSION_GATE_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_THEN)
                        .long("then")
                        .help("Paths to visit after a successful login")
                        .num_args(1..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Register a new account, example: --data '{\"email\":\"a@x.com\"}'")
                .arg(
                    Arg::new(ARG_DATA)
                        .short('d')
                        .long("data")
                        .help("Registration payload as JSON")
                        .required(true)
                        .value_parser(validator_json()),
                ),
        )
        .subcommand(
            Command::new(CMD_LOGOUT)
                .about("Log out of the session carried by --cookie")
                .arg(cookie_arg()),
        );

    logging::with_args(command)
}
