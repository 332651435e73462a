//! CLI authorization handshake and credential storage.

pub mod browser;
pub mod client;
pub mod credential;
pub mod error;
pub mod initiator;
pub mod login;
pub mod outcome;
pub mod poller;
pub mod request;
pub mod store;

pub use browser::{login_url, BrowserLauncher, SystemBrowser};
pub use client::CliAuthClient;
pub use credential::Credential;
pub use error::AuthError;
pub use initiator::AuthorizationInitiator;
pub use login::{LoginEvent, LoginEventSink, LoginFailure, LoginOrchestrator, LoginResult};
pub use outcome::{AttemptStatus, AuthorizationOutcome};
pub use poller::{AuthorizationPoller, PollOutcome, PollPolicy, PollProgress};
pub use request::AuthorizationRequest;
pub use store::{CredentialStore, CredentialStoreConfig, FileCredentialStore};
