//! stack-auth-cli — command-line login for Stack Auth
//!
//! Implements the browser-mediated CLI authorization handshake: create a
//! pending request for a tenancy, send the user to the web login page, poll
//! until the request resolves, and persist the issued refresh token.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use stack_auth_cli::auth::{FileCredentialStore, LoginOrchestrator, LoginResult};
//! use stack_auth_cli::config::ClientConfig;
//!
//! # async fn example() -> stack_auth_cli::error::Result<()> {
//! let config = ClientConfig::from_env(None)?;
//! let store = Arc::new(FileCredentialStore::new(config.credential_store_config()));
//! match LoginOrchestrator::from_config(&config, store).login("my-tenancy").await {
//!     LoginResult::Success => println!("logged in"),
//!     LoginResult::Failed(failure) => eprintln!("{failure}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
