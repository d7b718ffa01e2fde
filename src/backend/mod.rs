//! Backend: HTTP client for the administrative/attendance API.
//!
//! DESIGN
//! ======
//! Routes talk to the backend only through the `BackendApi` trait so tests
//! can substitute a mock. `BackendClient` is the real implementation: one
//! shared `reqwest::Client` carrying the configured timeouts, so every
//! outbound call is bounded. Success is exactly HTTP 200; anything else is
//! `BackendError::Rejected`. No call is retried.

pub mod types;

use axum::body::Bytes;
use reqwest::StatusCode;

use crate::config::BackendTimeouts;
pub use types::{BackendError, EnrollReceipt, EnrollRequest, LoginGrant};
use types::{parse_enroll_receipt, parse_json, parse_login_grant};

const LOGIN_PATH: &str = "/admin/login";
const ENROLL_PATH: &str = "/attendance/enroll_camera";
const TAKE_ATTENDANCE_PATH: &str = "/attendance/take_attendance";
const ABSENT_PATH: &str = "/attendance/absent";

// =============================================================================
// TRAIT
// =============================================================================

/// Operations the portal forwards to the backend on behalf of an admin.
#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    /// Base URL the client talks to, as exposed by `/api/config`.
    fn base_url(&self) -> &str;

    /// Exchange admin credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, BackendError>;

    /// Enroll a person's camera record.
    async fn enroll_camera(&self, access_token: &str, person: &EnrollRequest) -> Result<EnrollReceipt, BackendError>;

    /// Submit one JPEG camera frame for recognition.
    async fn take_attendance(&self, access_token: &str, frame: Bytes) -> Result<serde_json::Value, BackendError>;

    /// Fetch the people not seen during the current session.
    async fn absent(&self, access_token: &str) -> Result<serde_json::Value, BackendError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client for `base_url` with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeouts: BackendTimeouts) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a prepared request and return the body of a 200 response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            // A rejection stays a rejection even if its body cannot be read.
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected { status: status.as_u16(), body });
        }

        response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }
}

#[async_trait::async_trait]
impl BackendApi for BackendClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, BackendError> {
        let request = self
            .http
            .post(self.url(LOGIN_PATH))
            .form(&[("username", username), ("password", password)]);
        let body = self.send(request).await?;
        parse_login_grant(&body)
    }

    async fn enroll_camera(&self, access_token: &str, person: &EnrollRequest) -> Result<EnrollReceipt, BackendError> {
        let request = self
            .http
            .post(self.url(ENROLL_PATH))
            .bearer_auth(access_token)
            .json(person);
        let body = self.send(request).await?;
        parse_enroll_receipt(&body)
    }

    async fn take_attendance(&self, access_token: &str, frame: Bytes) -> Result<serde_json::Value, BackendError> {
        let request = self
            .http
            .post(self.url(TAKE_ATTENDANCE_PATH))
            .bearer_auth(access_token)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(frame);
        let body = self.send(request).await?;
        parse_json(&body)
    }

    async fn absent(&self, access_token: &str) -> Result<serde_json::Value, BackendError> {
        let request = self
            .http
            .get(self.url(ABSENT_PATH))
            .bearer_auth(access_token);
        let body = self.send(request).await?;
        parse_json(&body)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
