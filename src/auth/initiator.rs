use std::time::Duration;

use chrono::{DateTime, Utc};

use super::client::CliAuthClient;
use super::error::AuthError;
use super::request::AuthorizationRequest;

/// Default validity window requested for a new authorization.
pub const DEFAULT_REQUEST_TTL: Duration = Duration::from_secs(10 * 60);

/// Longest validity window the service accepts.
pub const MAX_REQUEST_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Starts CLI authorization requests.
#[derive(Debug, Clone)]
pub struct AuthorizationInitiator {
    client: CliAuthClient,
}

impl AuthorizationInitiator {
    pub fn new(client: CliAuthClient) -> Self {
        Self { client }
    }

    /// Create a pending authorization request for `tenancy_id`, valid for `ttl`.
    ///
    /// Sends exactly one request. Any failure (bad input, transport error,
    /// non-success status, or a body missing either code) is returned as an
    /// error for the caller to classify.
    pub async fn initiate(
        &self,
        tenancy_id: &str,
        ttl: Duration,
    ) -> Result<AuthorizationRequest, AuthError> {
        if tenancy_id.trim().is_empty() {
            return Err(AuthError::InvalidArgument(
                "tenancy id must not be empty".to_string(),
            ));
        }
        if ttl.is_zero() || ttl > MAX_REQUEST_TTL {
            return Err(AuthError::InvalidArgument(format!(
                "request ttl must be between 1ms and {}h, got {}ms",
                MAX_REQUEST_TTL.as_secs() / 3600,
                ttl.as_millis()
            )));
        }
        let expires_in_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        if expires_in_millis == 0 {
            return Err(AuthError::InvalidArgument(
                "request ttl must be at least 1ms".to_string(),
            ));
        }

        let requested_at = Utc::now();
        let body = self
            .client
            .create_attempt(tenancy_id, expires_in_millis)
            .await?;

        let polling_code = non_empty(body.polling_code).ok_or_else(|| {
            AuthError::InvalidResponse("response is missing polling_code".to_string())
        })?;
        let login_code = non_empty(body.login_code).ok_or_else(|| {
            AuthError::InvalidResponse("response is missing login_code".to_string())
        })?;
        let expires_at = body
            .expires_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(|| {
                tracing::debug!("expires_at missing or unparsable, estimating from ttl");
                requested_at + chrono::Duration::milliseconds(expires_in_millis as i64)
            });

        tracing::info!(tenancy_id, %expires_at, "Created CLI authorization request");
        Ok(AuthorizationRequest {
            tenancy_id: tenancy_id.to_string(),
            polling_code,
            login_code,
            expires_at,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_timestamp_with_millis() {
        let ts = parse_timestamp("2025-03-04T01:00:00.000Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-04T01:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_timestamp("tomorrow").is_none());
    }

    #[test]
    fn empty_code_counts_as_missing() {
        assert!(non_empty(Some(String::new())).is_none());
        assert_eq!(non_empty(Some("abc".into())).as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn empty_tenancy_is_rejected_without_request() {
        // Unroutable base URL: any request would surface as a network error.
        let initiator = AuthorizationInitiator::new(CliAuthClient::new("http://127.0.0.1:9"));
        let err = initiator.initiate("  ", DEFAULT_REQUEST_TTL).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn zero_ttl_is_rejected_without_request() {
        let initiator = AuthorizationInitiator::new(CliAuthClient::new("http://127.0.0.1:9"));
        let err = initiator.initiate("tenant", Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn ttl_above_service_limit_is_rejected() {
        let initiator = AuthorizationInitiator::new(CliAuthClient::new("http://127.0.0.1:9"));
        let err = initiator
            .initiate("tenant", MAX_REQUEST_TTL + Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }
}
