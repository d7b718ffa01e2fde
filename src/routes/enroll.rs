//! Enrollment route: forwards a person's camera enrollment to the backend.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Extension, Form};
use serde::Deserialize;

use super::{UNEXPECTED_RESPONSE, misconfigured, render};
use crate::backend::{BackendError, EnrollRequest};
use crate::session::AdminSession;
use crate::state::AppState;
use crate::templates::{Page, PageContext};

pub(crate) const ENROLL_FAILED: &str = "Failed to enroll";

#[derive(Deserialize)]
pub struct EnrollForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

/// `POST /enroll`: render the enrollment page with the backend's message.
pub async fn enroll(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<EnrollForm>,
) -> Response {
    let Some(backend) = &state.backend else {
        return misconfigured(&state);
    };

    let person = EnrollRequest { first_name: form.first_name, last_name: form.last_name };
    let token = session.token().unwrap_or_default();

    match backend.enroll_camera(token, &person).await {
        Ok(receipt) => {
            tracing::info!(first_name = %person.first_name, last_name = %person.last_name, "person enrolled");
            render(&state, Page::Enrollment, &PageContext::message(receipt.message), StatusCode::OK)
        }
        Err(BackendError::Transport(e)) => {
            tracing::warn!(error = %e, "backend unreachable during enrollment");
            render(&state, Page::Enrollment, &PageContext::message(e), StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(BackendError::Rejected { status, .. }) => {
            tracing::info!(status, "backend rejected enrollment");
            render(&state, Page::Enrollment, &PageContext::message(ENROLL_FAILED), StatusCode::UNAUTHORIZED)
        }
        Err(e) => {
            tracing::warn!(error = %e, "unusable enrollment response");
            render(&state, Page::Enrollment, &PageContext::error(UNEXPECTED_RESPONSE), StatusCode::BAD_GATEWAY)
        }
    }
}

#[cfg(test)]
#[path = "enroll_test.rs"]
mod tests;
