use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::AuthError;

const TENANCY_HEADER: &str = "X-Tenancy-ID";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin HTTP client for the identity service's CLI authorization endpoints.
///
/// Responses are returned as received; validation and classification happen in
/// [`super::AuthorizationInitiator`] and [`super::AuthorizationPoller`].
///
/// # Example
/// ```no_run
/// use stack_auth_cli::auth::CliAuthClient;
///
/// let client = CliAuthClient::new("http://localhost:3000/api/latest");
/// ```
#[derive(Debug, Clone)]
pub struct CliAuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl CliAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}/auth/cli`
    pub async fn create_attempt(
        &self,
        tenancy_id: &str,
        expires_in_millis: u64,
    ) -> Result<CreateAttemptBody, AuthError> {
        self.post(
            "auth/cli",
            tenancy_id,
            &CreateAttemptRequest { expires_in_millis },
        )
        .await
    }

    /// `POST {base}/auth/cli/poll`
    pub async fn poll_attempt(
        &self,
        tenancy_id: &str,
        polling_code: &str,
    ) -> Result<PollAttemptBody, AuthError> {
        self.post("auth/cli/poll", tenancy_id, &PollAttemptRequest { polling_code })
            .await
    }

    async fn post<B, T>(&self, path: &str, tenancy_id: &str, body: &B) -> Result<T, AuthError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .header(TENANCY_HEADER, tenancy_id)
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "(failed to read error body)".to_string());
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = resp.json().await?;
        Ok(envelope.body)
    }
}

#[derive(Debug, Serialize)]
struct CreateAttemptRequest {
    expires_in_millis: u64,
}

#[derive(Debug, Serialize)]
struct PollAttemptRequest<'a> {
    polling_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    body: T,
}

/// Body of a successful `auth/cli` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAttemptBody {
    pub polling_code: Option<String>,
    pub login_code: Option<String>,
    pub expires_at: Option<String>,
}

/// Body of a successful `auth/cli/poll` response.
#[derive(Clone, Default, Deserialize)]
pub struct PollAttemptBody {
    pub status: Option<String>,
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for PollAttemptBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollAttemptBody")
            .field("status", &self.status)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| ".."))
            .finish()
    }
}
