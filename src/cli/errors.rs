//! CLI-specific error formatting for user-facing messages.

use crate::auth::LoginFailure;
use crate::config::API_URL_ENV;
use crate::error::CliError;

/// Map a [`CliError`] to a user-facing help string with actionable guidance.
pub fn format_error_help(err: &CliError) -> String {
    match err {
        CliError::Login(failure) => match failure {
            LoginFailure::Initiation(_) | LoginFailure::Transport(_) => format!(
                "{failure}. Check --api-url or {API_URL_ENV} and your tenancy id"
            ),
            LoginFailure::Expired | LoginFailure::AlreadyUsed | LoginFailure::Timeout { .. } => {
                format!("{failure}. Run: stack-auth login --tenancy-id <ID> to start over")
            }
            other => format!("{other}"),
        },
        CliError::Configuration(msg) => {
            format!("Configuration error: {msg}. Check --api-url or {API_URL_ENV}")
        }
        other => format!("{other}"),
    }
}
