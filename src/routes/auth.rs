//! Auth routes: login against the backend, logout, and the session gate.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use super::{UNEXPECTED_RESPONSE, misconfigured, render};
use crate::backend::BackendError;
use crate::session::{self, AdminSession};
use crate::state::AppState;
use crate::templates::{Page, PageContext};

pub(crate) const BACKEND_UNREACHABLE: &str = "Backend unreachable";
pub(crate) const INVALID_CREDENTIALS: &str = "Invalid credentials";

// =============================================================================
// SESSION GATE
// =============================================================================

/// Middleware for gated routes: redirect to `/login` unless the session
/// holds an access token, otherwise hand the session to the handler as an
/// `Extension<AdminSession>`.
pub async fn require_session(jar: PrivateCookieJar, mut request: Request, next: Next) -> Response {
    let session = session::load(&jar);
    if session.token().is_none() {
        tracing::debug!(path = %request.uri().path(), "no session; redirecting to login");
        return Redirect::to("/login").into_response();
    }
    request.extensions_mut().insert(session);
    next.run(request).await
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /`: login page for anonymous visitors, dashboard otherwise.
pub async fn home(State(state): State<AppState>, jar: PrivateCookieJar) -> Response {
    if session::load(&jar).has_admin() {
        return Redirect::to("/dashboard").into_response();
    }
    render(&state, Page::Login, &PageContext::default(), StatusCode::OK)
}

/// `GET /login`: empty login form.
pub async fn login_page(State(state): State<AppState>) -> Response {
    render(&state, Page::Login, &PageContext::default(), StatusCode::OK)
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// `POST /login`: exchange credentials with the backend, store the grant in
/// the session, redirect to `/dashboard`. The session is untouched on failure.
pub async fn login(State(state): State<AppState>, jar: PrivateCookieJar, Form(form): Form<LoginForm>) -> Response {
    let Some(backend) = &state.backend else {
        return misconfigured(&state);
    };

    match backend.login(&form.username, &form.password).await {
        Ok(grant) => {
            let session = AdminSession::new(grant.access_token, grant.admin);
            let jar = session::store(jar, &session, state.config.cookie_secure);
            tracing::info!(admin = %session.admin_display(), "admin signed in");
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(BackendError::Transport(e)) => {
            tracing::warn!(error = %e, "backend unreachable during login");
            render(&state, Page::Login, &PageContext::error(BACKEND_UNREACHABLE), StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(BackendError::Rejected { status, .. }) => {
            tracing::info!(status, "backend rejected login");
            render(&state, Page::Login, &PageContext::error(INVALID_CREDENTIALS), StatusCode::UNAUTHORIZED)
        }
        Err(e) => {
            tracing::warn!(error = %e, "unusable login response");
            render(&state, Page::Login, &PageContext::error(UNEXPECTED_RESPONSE), StatusCode::BAD_GATEWAY)
        }
    }
}

/// `GET /logout`: drop the session cookie and return to the login page.
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    (session::clear(jar), Redirect::to("/login"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
