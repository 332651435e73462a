use std::str::FromStr;

use strum::{Display, EnumString};

use super::client::PollAttemptBody;

/// Status strings the service reports for a CLI authorization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AttemptStatus {
    Waiting,
    Success,
    Expired,
    Used,
}

/// Classification of a single poll response.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// The user has not finished logging in yet.
    Waiting,
    /// A refresh token was issued. Never empty.
    Success { refresh_token: String },
    Expired,
    AlreadyUsed,
    /// Anything the client does not recognise, including `success` without a token.
    Unknown { status: String },
}

impl AuthorizationOutcome {
    pub fn classify(body: PollAttemptBody) -> Self {
        let raw = body.status.unwrap_or_default();
        match AttemptStatus::from_str(&raw) {
            Ok(AttemptStatus::Waiting) => Self::Waiting,
            Ok(AttemptStatus::Success) => match body.refresh_token {
                Some(token) if !token.is_empty() => Self::Success {
                    refresh_token: token,
                },
                _ => Self::Unknown {
                    status: "success without refresh_token".to_string(),
                },
            },
            Ok(AttemptStatus::Expired) => Self::Expired,
            Ok(AttemptStatus::Used) => Self::AlreadyUsed,
            Err(_) => Self::Unknown { status: raw },
        }
    }
}

impl std::fmt::Debug for AuthorizationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => f.write_str("Waiting"),
            Self::Success { .. } => f.write_str("Success { .. }"),
            Self::Expired => f.write_str("Expired"),
            Self::AlreadyUsed => f.write_str("AlreadyUsed"),
            Self::Unknown { status } => f.debug_struct("Unknown").field("status", status).finish(),
        }
    }
}
