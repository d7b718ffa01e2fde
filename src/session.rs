//! Admin session carried in an encrypted cookie.
//!
//! The session is the only per-user state the portal holds. It lives
//! entirely client-side inside a `PrivateCookieJar` cookie, so handlers
//! never share mutable state across requests.

use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

pub const COOKIE_NAME: &str = "portal_session";

/// Decoded session contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub admin: serde_json::Value,
}

impl AdminSession {
    #[must_use]
    pub fn new(access_token: impl Into<String>, admin: serde_json::Value) -> Self {
        Self { access_token: Some(access_token.into()), admin }
    }

    /// Bearer token, if the session holds a non-empty one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Whether an admin identity is present (null, `false`, `""`, `0`, and
    /// empty collections count as absent).
    #[must_use]
    pub fn has_admin(&self) -> bool {
        is_truthy(&self.admin)
    }

    /// Display form of the admin identity for page headers.
    #[must_use]
    pub fn admin_display(&self) -> String {
        match &self.admin {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(map) => ["username", "name", "email"]
                .iter()
                .find_map(|k| map.get(*k).and_then(serde_json::Value::as_str))
                .map_or_else(|| self.admin.to_string(), str::to_owned),
            other => other.to_string(),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}

/// Derive the 64-byte cookie key from the configured secret.
#[must_use]
pub fn derive_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Read the session from the jar. Missing or undecodable cookies yield an
/// empty session.
#[must_use]
pub fn load(jar: &PrivateCookieJar) -> AdminSession {
    jar.get(COOKIE_NAME)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}

/// Replace the session cookie with `session`.
#[must_use]
pub fn store(jar: PrivateCookieJar, session: &AdminSession, secure: bool) -> PrivateCookieJar {
    let Ok(value) = serde_json::to_string(session) else {
        return jar;
    };
    jar.add(session_cookie(value, secure))
}

/// Drop the session cookie entirely.
#[must_use]
pub fn clear(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(COOKIE_NAME).path("/"))
}

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
