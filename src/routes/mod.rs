//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public routes (login, logout, config probe) sit beside a gated sub-router
//! whose every route runs behind `auth::require_session`. Page handlers
//! render templates; backend-facing handlers make exactly one outbound call
//! and map its outcome to a status code.

pub mod attendance;
pub mod auth;
pub mod enroll;
pub mod pages;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::templates::{Page, PageContext};

pub(crate) const MISCONFIGURED: &str = "Server misconfigured: BACKEND_URL is missing.";
pub(crate) const UNEXPECTED_RESPONSE: &str = "Backend returned an unexpected response";

/// Largest camera frame accepted by `/api/attendance/frame`.
pub(crate) const FRAME_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Routes that require an authenticated admin session.
fn gated_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/enrollment", get(pages::enrollment))
        .route("/enroll", post(enroll::enroll))
        .route("/attendance", get(pages::attendance))
        .route(
            "/api/attendance/frame",
            post(attendance::frame).layer(DefaultBodyLimit::max(FRAME_BODY_LIMIT)),
        )
        .route("/api/attendance/absent", get(attendance::absent))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session))
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(auth::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/api/config", get(pages::api_config))
        .route("/healthz", get(healthz))
        .merge(gated_routes(&state))
        .nest_service("/static", static_files)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Render `page` with `status`, or a 500 if the template cannot be rendered.
pub(crate) fn render(state: &AppState, page: Page, ctx: &PageContext, status: StatusCode) -> Response {
    match state.templates.render(page, ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Login page explaining that no backend is configured.
pub(crate) fn misconfigured(state: &AppState) -> Response {
    tracing::error!("BACKEND_URL is not configured");
    render(state, Page::Login, &PageContext::error(MISCONFIGURED), StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
