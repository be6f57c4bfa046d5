use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use pollsmith_application::DEFAULT_SURVEY_FETCH_LIMIT;
use pollsmith_core::AppError;
use tracing_subscriber::EnvFilter;

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub seed: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub survey_fetch_limit: usize,
}

impl ApiConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, AppError> {
        let mode = env::args().nth(1);
        let migrate_only = mode.as_deref() == Some("migrate");
        let seed = mode.as_deref() == Some("seed");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let bootstrap_token = required_env("AUTH_BOOTSTRAP_TOKEN")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let survey_fetch_limit = match env::var("SURVEY_FETCH_LIMIT") {
            Ok(value) => value.parse::<usize>().map_err(|error| {
                AppError::Validation(format!("invalid SURVEY_FETCH_LIMIT: {error}"))
            })?,
            Err(_) => DEFAULT_SURVEY_FETCH_LIMIT,
        };

        Ok(Self {
            migrate_only,
            seed,
            database_url,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            survey_fetch_limit,
        })
    }

    /// Returns the socket address the server binds to.
    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

/// Initializes the tracing subscriber from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
