use std::fmt;

use serde::{Deserialize, Serialize};

/// Locally persisted credential record.
///
/// # Example
/// ```no_run
/// use stack_auth_cli::auth::Credential;
///
/// let credential = Credential::new("refresh-token");
/// assert!(credential.is_authenticated());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Credential {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Whether a usable refresh token is present.
    pub fn is_authenticated(&self) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| ".."))
            .finish()
    }
}
