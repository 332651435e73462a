use std::fmt;

use chrono::{DateTime, Utc};

/// A pending CLI authorization request issued by the identity service.
///
/// Only [`super::AuthorizationInitiator`] constructs these, and only when both
/// codes are present, so a value of this type is always usable for polling.
#[derive(Clone)]
pub struct AuthorizationRequest {
    pub tenancy_id: String,
    pub polling_code: String,
    pub login_code: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for AuthorizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationRequest")
            .field("tenancy_id", &self.tenancy_id)
            .field("polling_code", &"..")
            .field("login_code", &self.login_code)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
