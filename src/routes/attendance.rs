//! Attendance stream proxy: JSON passthrough for the camera page.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::Extension;

use super::{MISCONFIGURED, UNEXPECTED_RESPONSE};
use crate::backend::BackendError;
use crate::session::AdminSession;
use crate::state::AppState;

/// `POST /api/attendance/frame`: forward one JPEG frame for recognition.
pub async fn frame(State(state): State<AppState>, Extension(session): Extension<AdminSession>, body: Bytes) -> Response {
    let Some(backend) = &state.backend else {
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, MISCONFIGURED);
    };
    passthrough(
        backend
            .take_attendance(session.token().unwrap_or_default(), body)
            .await,
    )
}

/// `GET /api/attendance/absent`: people not seen during this session.
pub async fn absent(State(state): State<AppState>, Extension(session): Extension<AdminSession>) -> Response {
    let Some(backend) = &state.backend else {
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, MISCONFIGURED);
    };
    passthrough(backend.absent(session.token().unwrap_or_default()).await)
}

pub(crate) fn passthrough(result: Result<serde_json::Value, BackendError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(BackendError::Transport(e)) => {
            tracing::warn!(error = %e, "backend unreachable during attendance");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "Backend unreachable")
        }
        Err(BackendError::Rejected { status, .. }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            json_error(status, "Backend rejected request")
        }
        Err(e) => {
            tracing::warn!(error = %e, "unusable attendance response");
            json_error(StatusCode::BAD_GATEWAY, UNEXPECTED_RESPONSE)
        }
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
