//! Page templates.
//!
//! Pages are plain HTML with `{{PLACEHOLDER}}` slots, compiled in with
//! `include_str!`. When `TEMPLATE_DIR` is configured the file is read from
//! disk on every render instead, which is the only way rendering can fail.

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");
const ENROLLMENT_TEMPLATE: &str = include_str!("../templates/enrollment.html");
const ATTENDANCE_TEMPLATE: &str = include_str!("../templates/attendance.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    Enrollment,
    Attendance,
}

impl Page {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Login => "login.html",
            Self::Dashboard => "dashboard.html",
            Self::Enrollment => "enrollment.html",
            Self::Attendance => "attendance.html",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            Self::Login => LOGIN_TEMPLATE,
            Self::Dashboard => DASHBOARD_TEMPLATE,
            Self::Enrollment => ENROLLMENT_TEMPLATE,
            Self::Attendance => ATTENDANCE_TEMPLATE,
        }
    }
}

/// Values substituted into a page. Everything is HTML-escaped.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub error: Option<String>,
    pub message: Option<String>,
    pub admin: Option<String>,
}

impl PageContext {
    #[must_use]
    pub fn error(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::default() }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::default() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "template render error");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Template render error: {self}")).into_response()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Templates {
    dir: Option<PathBuf>,
}

impl Templates {
    #[must_use]
    pub fn embedded() -> Self {
        Self { dir: None }
    }

    #[must_use]
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }

    /// Render `page` with `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if a template directory is configured and the
    /// page's file cannot be read.
    pub fn render(&self, page: Page, ctx: &PageContext) -> Result<String, RenderError> {
        let source = match &self.dir {
            Some(dir) => read_template(dir, page)?,
            None => page.embedded().to_owned(),
        };
        Ok(fill(&source, ctx))
    }
}

fn read_template(dir: &Path, page: Page) -> Result<String, RenderError> {
    let path = dir.join(page.file_name());
    std::fs::read_to_string(&path).map_err(|source| RenderError::Io { path, source })
}

fn fill(source: &str, ctx: &PageContext) -> String {
    source
        .replace("{{ERROR}}", &notice("error", ctx.error.as_deref()))
        .replace("{{MESSAGE}}", &notice("message", ctx.message.as_deref()))
        .replace("{{ADMIN}}", &escape_html(ctx.admin.as_deref().unwrap_or_default()))
}

fn notice(class: &str, text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => format!(r#"<p class="{class}">{}</p>"#, escape_html(text)),
        _ => String::new(),
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
