//! Portal configuration parsed from environment variables.
//!
//! Read once in `main` and shared through `AppState`. A missing
//! `BACKEND_URL` is a valid configuration: routes that need the backend
//! detect it per request and report a server error.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Default for BackendTimeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            connect: Duration::from_secs(DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub backend_url: Option<String>,
    /// Secret the session cookie key is derived from.
    pub secret_key: Option<String>,
    pub bind_addr: String,
    pub port: u16,
    /// Externally visible URL of the portal itself.
    pub public_url: Option<String>,
    pub cookie_secure: bool,
    pub timeouts: BackendTimeouts,
    /// Read templates from disk instead of the compiled-in copies.
    pub template_dir: Option<PathBuf>,
    pub static_dir: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            secret_key: None,
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            port: DEFAULT_PORT,
            public_url: None,
            cookie_secure: false,
            timeouts: BackendTimeouts::default(),
            template_dir: None,
            static_dir: default_static_dir(),
        }
    }
}

impl PortalConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BACKEND_URL`: backend base URL (routes report misconfiguration when absent)
    /// - `SECRET_KEY`: session secret (a per-process key is generated when absent)
    /// - `PORT`: default 5000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `BACKEND_TIMEOUT_SECS`: default 10
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 5
    /// - `PUBLIC_URL`: URL the portal is served at
    /// - `COOKIE_SECURE`: inferred from an `https://` `PUBLIC_URL` when unset
    /// - `TEMPLATE_DIR`: template override directory
    /// - `STATIC_DIR`: default `static/` next to `Cargo.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = normalize_backend_url(std::env::var("BACKEND_URL").ok().as_deref());
        let secret_key = std::env::var("SECRET_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let port = env_parse("PORT", DEFAULT_PORT)?;
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());

        let timeouts = BackendTimeouts {
            request: Duration::from_secs(env_parse("BACKEND_TIMEOUT_SECS", DEFAULT_BACKEND_TIMEOUT_SECS)?),
            connect: Duration::from_secs(env_parse(
                "BACKEND_CONNECT_TIMEOUT_SECS",
                DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
            )?),
        };

        let public_url = std::env::var("PUBLIC_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| {
            public_url
                .as_deref()
                .is_some_and(|url| url.starts_with("https://"))
        });

        let template_dir = std::env::var("TEMPLATE_DIR").ok().map(PathBuf::from);
        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_static_dir());

        Ok(Self {
            backend_url,
            secret_key,
            bind_addr,
            port,
            public_url,
            cookie_secure,
            timeouts,
            template_dir,
            static_dir,
        })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        Err(_) => Ok(default),
    }
}

fn normalize_backend_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
