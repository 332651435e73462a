//! CLI command handlers for login, status, and logout.

use std::io::Write;
use std::sync::Arc;

use crate::auth::{
    CredentialStore, FileCredentialStore, LoginEvent, LoginOrchestrator, LoginResult,
};
use crate::config::ClientConfig;
use crate::error::Result;

use super::LoginArgs;

/// Handle `stack-auth login --tenancy-id <ID>`.
pub async fn handle_login(args: &LoginArgs) -> Result<()> {
    let mut config = ClientConfig::from_env(args.api_url.as_deref())?;
    if args.no_browser {
        config.open_browser = false;
    }
    let store = Arc::new(FileCredentialStore::new(config.credential_store_config()));

    println!("Initiating CLI authentication...");
    let orchestrator = LoginOrchestrator::from_config(&config, store)
        .with_event_sink(Arc::new(print_event));

    match orchestrator.login(&args.tenancy_id).await {
        LoginResult::Success => {
            println!("\nAuthentication successful! You are now logged in.");
            Ok(())
        }
        LoginResult::Failed(failure) => {
            println!();
            Err(failure.into())
        }
    }
}

fn print_event(event: LoginEvent) {
    match event {
        LoginEvent::Initiated { expires_at } => {
            tracing::debug!(%expires_at, "Authorization request created");
        }
        LoginEvent::BrowserHandoff { url, opened } => {
            if opened {
                println!(
                    "Opening browser to authenticate. If it doesn't open automatically, please visit:\n{url}"
                );
            } else {
                println!("Visit this URL to authenticate:\n{url}");
            }
            println!("Waiting for authentication to complete...");
        }
        LoginEvent::Waiting(_) => {
            print!(".");
            let _ = std::io::stdout().flush();
        }
    }
}

/// Handle `stack-auth status`.
pub async fn handle_status() -> Result<()> {
    let config = ClientConfig::from_env(None)?;
    let store = FileCredentialStore::new(config.credential_store_config());

    println!("Authentication Status\n");
    if store.load().is_authenticated() {
        println!("  Logged in (credentials in {})", store.path().display());
    } else {
        println!("  Not logged in");
    }
    println!("  API: {}", config.api_url);
    Ok(())
}

/// Handle `stack-auth logout`.
pub async fn handle_logout() -> Result<()> {
    let config = ClientConfig::from_env(None)?;
    let store = FileCredentialStore::new(config.credential_store_config());

    store.clear()?;
    println!("Logged out");
    Ok(())
}
