use std::sync::Arc;
use std::time::Duration;

use bon::Builder;

use super::client::CliAuthClient;
use super::error::AuthError;
use super::outcome::AuthorizationOutcome;
use crate::util::{Sleeper, TokioSleeper};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Spacing and bound for the poll loop.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use stack_auth_cli::auth::PollPolicy;
///
/// let policy = PollPolicy::builder().max_attempts(3).build();
/// assert_eq!(policy.interval, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct PollPolicy {
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    pub interval: Duration,
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PollPolicy {
    /// Upper bound on the time spent waiting between attempts.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Emitted once per `waiting` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollProgress {
    pub attempt: u32,
    pub max_attempts: u32,
}

/// Terminal result of the poll loop.
#[derive(Debug)]
pub enum PollOutcome {
    Success { refresh_token: String },
    Expired,
    AlreadyUsed,
    Unknown { status: String },
    /// The status query itself failed; not retried.
    TransportError(AuthError),
    /// Every attempt came back `waiting`.
    Timeout { attempts: u32 },
}

/// Polls an authorization request until it resolves.
pub struct AuthorizationPoller {
    client: CliAuthClient,
    sleeper: Arc<dyn Sleeper>,
}

impl AuthorizationPoller {
    pub fn new(client: CliAuthClient) -> Self {
        Self {
            client,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Query the request status until a terminal outcome or `policy.max_attempts`
    /// queries have been sent.
    ///
    /// Exactly one query is sent per attempt. `on_waiting` is called after each
    /// `waiting` response; the loop then sleeps `policy.interval` unless that was
    /// the last attempt.
    pub async fn poll(
        &self,
        tenancy_id: &str,
        polling_code: &str,
        policy: &PollPolicy,
        mut on_waiting: impl FnMut(PollProgress),
    ) -> PollOutcome {
        for attempt in 1..=policy.max_attempts {
            let body = match self.client.poll_attempt(tenancy_id, polling_code).await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "Error polling auth status");
                    return PollOutcome::TransportError(err);
                }
            };

            let outcome = AuthorizationOutcome::classify(body);
            tracing::debug!(attempt, ?outcome, "Poll response");
            match outcome {
                AuthorizationOutcome::Waiting => {
                    on_waiting(PollProgress {
                        attempt,
                        max_attempts: policy.max_attempts,
                    });
                    if attempt < policy.max_attempts {
                        self.sleeper.sleep(policy.interval).await;
                    }
                }
                AuthorizationOutcome::Success { refresh_token } => {
                    return PollOutcome::Success { refresh_token };
                }
                AuthorizationOutcome::Expired => return PollOutcome::Expired,
                AuthorizationOutcome::AlreadyUsed => return PollOutcome::AlreadyUsed,
                AuthorizationOutcome::Unknown { status } => {
                    return PollOutcome::Unknown { status };
                }
            }
        }

        tracing::info!(attempts = policy.max_attempts, "Timed out waiting for authentication");
        PollOutcome::Timeout {
            attempts: policy.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_five_minutes() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.max_attempts, 60);
        assert_eq!(policy.max_wait(), Duration::from_secs(300));
    }

    #[test]
    fn builder_overrides_interval() {
        let policy = PollPolicy::builder()
            .interval(Duration::from_millis(10))
            .build();
        assert_eq!(policy.interval, Duration::from_millis(10));
        assert_eq!(policy.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn zero_attempts_times_out_without_requests() {
        let poller = AuthorizationPoller::new(CliAuthClient::new("http://127.0.0.1:9"));
        let policy = PollPolicy::builder().max_attempts(0).build();
        let outcome = poller.poll("tenant", "code", &policy, |_| {}).await;
        assert!(matches!(outcome, PollOutcome::Timeout { attempts: 0 }));
    }
}
