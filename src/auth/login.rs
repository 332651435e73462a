//! The CLI login flow: initiate, hand off to the browser, poll, persist.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use thiserror::Error;

use super::browser::{login_url, BrowserLauncher, SystemBrowser};
use super::client::CliAuthClient;
use super::credential::Credential;
use super::error::AuthError;
use super::initiator::AuthorizationInitiator;
use super::poller::{AuthorizationPoller, PollOutcome, PollPolicy, PollProgress};
use super::store::CredentialStore;
use crate::config::ClientConfig;
use crate::util::Sleeper;

/// Why a login attempt did not produce a stored credential.
///
/// The `Display` text is the user-facing message for each category.
#[derive(Debug, Error)]
pub enum LoginFailure {
    #[error("Failed to initiate CLI authentication: {0}")]
    Initiation(AuthError),
    #[error("Authentication request expired")]
    Expired,
    #[error("Authentication request already used")]
    AlreadyUsed,
    #[error("Unknown authentication status: {status}")]
    UnknownStatus { status: String },
    #[error("Error polling auth status: {0}")]
    Transport(AuthError),
    #[error("Timed out waiting for authentication after {attempts} attempts")]
    Timeout { attempts: u32 },
    #[error("Authenticated, but saving credentials failed: {0}")]
    Save(AuthError),
}

/// Final result of [`LoginOrchestrator::login`].
#[derive(Debug)]
pub enum LoginResult {
    Success,
    Failed(LoginFailure),
}

impl LoginResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Progress notifications for presenting the flow to a user.
#[derive(Debug, Clone)]
pub enum LoginEvent {
    /// The authorization request was created.
    Initiated { expires_at: DateTime<Utc> },
    /// The login URL is ready. `opened` is false when no browser was launched.
    BrowserHandoff { url: Url, opened: bool },
    /// The service reported `waiting` for this attempt.
    Waiting(PollProgress),
}

pub type LoginEventSink = Arc<dyn Fn(LoginEvent) + Send + Sync>;

/// Runs the CLI authorization handshake against one identity service.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use stack_auth_cli::auth::{FileCredentialStore, LoginOrchestrator};
/// use stack_auth_cli::config::ClientConfig;
///
/// # async fn example() -> Result<(), stack_auth_cli::error::CliError> {
/// let config = ClientConfig::from_env(None)?;
/// let store = Arc::new(FileCredentialStore::new(config.credential_store_config()));
/// let login = LoginOrchestrator::from_config(&config, store);
/// let result = login.login("7eef59fd-72a0-47d7-a87d-eaec5ec5bb05").await;
/// # let _ = result;
/// # Ok(())
/// # }
/// ```
pub struct LoginOrchestrator {
    initiator: AuthorizationInitiator,
    poller: AuthorizationPoller,
    store: Arc<dyn CredentialStore>,
    browser: Option<Arc<dyn BrowserLauncher>>,
    web_origin: Url,
    ttl: Duration,
    policy: PollPolicy,
    event_sink: Option<LoginEventSink>,
}

impl LoginOrchestrator {
    pub fn new(client: CliAuthClient, web_origin: Url, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            initiator: AuthorizationInitiator::new(client.clone()),
            poller: AuthorizationPoller::new(client),
            store,
            browser: Some(Arc::new(SystemBrowser)),
            web_origin,
            ttl: super::initiator::DEFAULT_REQUEST_TTL,
            policy: PollPolicy::default(),
            event_sink: None,
        }
    }

    pub fn from_config(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
        let client = CliAuthClient::new(config.api_url.as_str());
        let orchestrator = Self::new(client, config.web_origin(), store)
            .with_ttl(config.ttl)
            .with_poll_policy(config.poll.clone());
        if config.open_browser {
            orchestrator
        } else {
            orchestrator.with_browser(None)
        }
    }

    /// Replace the browser launcher; `None` only reports the URL.
    pub fn with_browser(mut self, browser: Option<Arc<dyn BrowserLauncher>>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.poller = self.poller.with_sleeper(sleeper);
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_event_sink(mut self, sink: LoginEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Run the full flow for `tenancy_id`.
    ///
    /// Every failure is folded into [`LoginResult::Failed`]; the credential
    /// store is written only when the service issues a refresh token.
    pub async fn login(&self, tenancy_id: &str) -> LoginResult {
        let request = match self.initiator.initiate(tenancy_id, self.ttl).await {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to initiate CLI authentication");
                return LoginResult::Failed(LoginFailure::Initiation(err));
            }
        };
        self.emit(LoginEvent::Initiated {
            expires_at: request.expires_at,
        });

        let url = login_url(&self.web_origin, &request.login_code, &request.tenancy_id);
        let opened = self.open_browser(&url);
        self.emit(LoginEvent::BrowserHandoff { url, opened });

        let outcome = self
            .poller
            .poll(
                &request.tenancy_id,
                &request.polling_code,
                &self.policy,
                |progress| self.emit(LoginEvent::Waiting(progress)),
            )
            .await;

        let failure = match outcome {
            PollOutcome::Success { refresh_token } => {
                return match self.store.save(&Credential::new(refresh_token)) {
                    Ok(()) => {
                        tracing::info!(tenancy_id, "CLI authentication succeeded");
                        LoginResult::Success
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Error saving config");
                        LoginResult::Failed(LoginFailure::Save(err))
                    }
                };
            }
            PollOutcome::Expired => LoginFailure::Expired,
            PollOutcome::AlreadyUsed => LoginFailure::AlreadyUsed,
            PollOutcome::Unknown { status } => LoginFailure::UnknownStatus { status },
            PollOutcome::TransportError(err) => LoginFailure::Transport(err),
            PollOutcome::Timeout { attempts } => LoginFailure::Timeout { attempts },
        };
        LoginResult::Failed(failure)
    }

    fn open_browser(&self, url: &Url) -> bool {
        let Some(browser) = &self.browser else {
            return false;
        };
        match browser.open(url.as_str()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Could not open browser");
                false
            }
        }
    }

    fn emit(&self, event: LoginEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }
}
