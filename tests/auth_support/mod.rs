#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use stack_auth_cli::auth::{AuthError, BrowserLauncher, Credential, CredentialStore};
use stack_auth_cli::util::Sleeper;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TENANT: &str = "7eef59fd-72a0-47d7-a87d-eaec5ec5bb05";
pub const INITIATE_PATH: &str = "/api/latest/auth/cli";
pub const POLL_PATH: &str = "/api/latest/auth/cli/poll";

pub fn api_base(server: &MockServer) -> String {
    format!("{}/api/latest", server.uri())
}

pub fn initiate_mock() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(INITIATE_PATH))
        .and(header("x-tenancy-id", TENANT))
}

pub fn poll_mock(polling_code: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(POLL_PATH))
        .and(header("x-tenancy-id", TENANT))
        .and(body_json(json!({ "polling_code": polling_code })))
}

pub fn initiate_body(polling_code: &str, login_code: &str) -> Value {
    json!({
        "body": {
            "polling_code": polling_code,
            "login_code": login_code,
            "expires_at": "2025-03-04T01:00:00.000Z"
        }
    })
}

pub fn status_body(status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "body": { "status": status } }))
}

pub fn success_body(refresh_token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "body": { "status": "success", "refresh_token": refresh_token }
    }))
}

/// Credential store kept in memory; optionally refuses writes.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credential: Mutex<Credential>,
    saves: Mutex<usize>,
    fail_saves: bool,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, credential: Credential) {
        *self.credential.lock().expect("store lock poisoned") = credential;
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().expect("store lock poisoned")
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Credential {
        self.credential.lock().expect("store lock poisoned").clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        *self.saves.lock().expect("store lock poisoned") += 1;
        if self.fail_saves {
            return Err(AuthError::Io("read-only file system".to_string()));
        }
        *self.credential.lock().expect("store lock poisoned") = credential.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.credential.lock().expect("store lock poisoned") = Credential::default();
        Ok(())
    }
}

/// Browser launcher that records URLs instead of opening them.
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("browser lock poisoned").clone()
    }
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        self.opened
            .lock()
            .expect("browser lock poisoned")
            .push(url.to_string());
        if self.fail {
            return Err(AuthError::Browser("no display".to_string()));
        }
        Ok(())
    }
}

/// Sleeper that returns immediately and records requested durations.
#[derive(Default)]
pub struct InstantSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("sleeper lock poisoned").clone()
    }
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .expect("sleeper lock poisoned")
            .push(duration);
    }
}
