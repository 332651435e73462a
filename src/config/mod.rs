//! Configuration system (layered: explicit override > env > built-in default).

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::auth::initiator::DEFAULT_REQUEST_TTL;
use crate::auth::poller::PollPolicy;
use crate::auth::store::CredentialStoreConfig;
use crate::error::CliError;

pub const API_URL_ENV: &str = "STACK_AUTH_API_URL";
pub const CONFIG_DIR_ENV: &str = "STACK_AUTH_CONFIG_DIR";
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/latest";

/// Resolved client configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub config_dir: PathBuf,
    pub ttl: Duration,
    pub poll: PollPolicy,
    pub open_browser: bool,
}

impl ClientConfig {
    pub fn new(api_url: Url, config_dir: PathBuf) -> Self {
        Self {
            api_url,
            config_dir,
            ttl: DEFAULT_REQUEST_TTL,
            poll: PollPolicy::default(),
            open_browser: true,
        }
    }

    /// Load from the process environment (and `.env`, if present).
    pub fn from_env(api_url_override: Option<&str>) -> Result<Self, CliError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::resolve(api_url_override, |key| std::env::var(key).ok())
    }

    /// Resolve configuration using `lookup` for environment values.
    pub fn resolve(
        api_url_override: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let raw_url = api_url_override
            .map(str::to_string)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(raw_url.trim())?;

        let config_dir = lookup(CONFIG_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(CredentialStoreConfig::default_dir);

        Ok(Self::new(api_url, config_dir))
    }

    /// Origin of the web app, used for the browser login page.
    ///
    /// Strips the API path suffix (`/api/latest`, `/api/v1`, ...) from the API
    /// base URL.
    pub fn web_origin(&self) -> Url {
        let mut origin = self.api_url.clone();
        let path = self.api_url.path().trim_end_matches('/');
        let stripped = match path.rfind("/api/") {
            Some(idx) => &path[..idx],
            None => path.strip_suffix("/api").unwrap_or(path),
        };
        origin.set_path(stripped);
        origin.set_query(None);
        origin.set_fragment(None);
        origin
    }

    pub fn credential_store_config(&self) -> CredentialStoreConfig {
        CredentialStoreConfig::new(self.config_dir.clone())
    }
}

fn parse_api_url(raw: &str) -> Result<Url, CliError> {
    let url = Url::parse(raw)
        .map_err(|e| CliError::Configuration(format!("invalid API URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CliError::Configuration(format!(
            "unsupported API URL scheme '{other}' in '{raw}'"
        ))),
    }
}
