//! Error types for the CLI.

use thiserror::Error;

use crate::auth::{AuthError, LoginFailure};

/// Primary error type for CLI command handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Login(#[from] LoginFailure),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AuthError> for CliError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Io(msg) => CliError::Io(std::io::Error::other(msg)),
            other => CliError::Authentication(other.to_string()),
        }
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failure_displays_verbatim() {
        let err = CliError::from(LoginFailure::Expired);
        assert_eq!(err.to_string(), "Authentication request expired");
    }

    #[test]
    fn auth_io_error_maps_to_io() {
        let err = CliError::from(AuthError::Io("permission denied".into()));
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn other_auth_errors_map_to_authentication() {
        let err = CliError::from(AuthError::InvalidResponse("bad".into()));
        assert!(matches!(err, CliError::Authentication(_)));
    }
}
