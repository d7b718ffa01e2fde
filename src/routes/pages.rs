//! Page routes and the client config probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Json, Response};
use axum::Extension;
use axum_extra::extract::PrivateCookieJar;
use serde::Serialize;

use super::render;
use crate::session::{self, AdminSession};
use crate::state::AppState;
use crate::templates::{Page, PageContext};

/// Body of `GET /api/config`.
#[derive(Debug, Serialize)]
pub struct ClientConfig {
    pub backend_url: Option<String>,
    pub access_token: Option<String>,
}

/// `GET /api/config`: backend URL and the caller's token, `null` when absent.
pub async fn api_config(State(state): State<AppState>, jar: PrivateCookieJar) -> Json<ClientConfig> {
    let session = session::load(&jar);
    Json(ClientConfig {
        backend_url: state.backend_url().map(str::to_owned),
        access_token: session.token().map(str::to_owned),
    })
}

/// `GET /dashboard`
pub async fn dashboard(State(state): State<AppState>, Extension(session): Extension<AdminSession>) -> Response {
    let ctx = PageContext { admin: Some(session.admin_display()), ..PageContext::default() };
    render(&state, Page::Dashboard, &ctx, StatusCode::OK)
}

/// `GET /enrollment`
pub async fn enrollment(State(state): State<AppState>) -> Response {
    render(&state, Page::Enrollment, &PageContext::default(), StatusCode::OK)
}

/// `GET /attendance`
pub async fn attendance(State(state): State<AppState>) -> Response {
    render(&state, Page::Attendance, &PageContext::default(), StatusCode::OK)
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
