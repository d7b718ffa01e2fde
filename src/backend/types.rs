//! Backend wire types, errors, and pure response parsing.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("{0}")]
    Transport(String),
    #[error("backend rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("unexpected backend response: {0}")]
    Parse(String),
}

/// Credentials granted by `POST /admin/login`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub access_token: String,
    /// Opaque admin identity echoed back by the backend.
    pub admin: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollReceipt {
    pub message: String,
}

#[derive(Deserialize)]
struct LoginBody {
    access_token: Option<String>,
    #[serde(default)]
    admin: serde_json::Value,
}

#[derive(Deserialize)]
struct EnrollBody {
    message: Option<serde_json::Value>,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_login_grant(body: &str) -> Result<LoginGrant, BackendError> {
    let parsed: LoginBody = serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;
    let access_token = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| BackendError::Parse("login response has no access_token".into()))?;
    Ok(LoginGrant { access_token, admin: parsed.admin })
}

pub(crate) fn parse_enroll_receipt(body: &str) -> Result<EnrollReceipt, BackendError> {
    let parsed: EnrollBody = serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;
    let message = match parsed.message {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => {
            return Err(BackendError::Parse("enroll response has no message".into()));
        }
        Some(other) => other.to_string(),
    };
    Ok(EnrollReceipt { message })
}

pub(crate) fn parse_json(body: &str) -> Result<serde_json::Value, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
