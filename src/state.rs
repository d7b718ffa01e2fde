//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries the startup configuration, the optional backend client (absent
//! when `BACKEND_URL` is unset), the page templates, and the cookie key used
//! by `PrivateCookieJar`. Nothing in it is mutated after startup.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::backend::BackendApi;
use crate::config::PortalConfig;
use crate::session;
use crate::templates::Templates;

/// Clone is required by Axum: all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PortalConfig>,
    /// `None` if `BACKEND_URL` is not configured.
    pub backend: Option<Arc<dyn BackendApi>>,
    pub templates: Templates,
    pub cookie_key: Key,
}

impl AppState {
    #[must_use]
    pub fn new(config: PortalConfig, backend: Option<Arc<dyn BackendApi>>) -> Self {
        let cookie_key = match config.secret_key.as_deref() {
            Some(secret) => session::derive_key(secret),
            None => {
                tracing::warn!("SECRET_KEY not set; sessions will not survive a restart");
                Key::generate()
            }
        };
        let templates = match &config.template_dir {
            Some(dir) => Templates::from_dir(dir),
            None => Templates::embedded(),
        };
        Self { config: Arc::new(config), backend, templates, cookie_key }
    }

    /// Backend base URL as configured, for `/api/config`.
    #[must_use]
    pub fn backend_url(&self) -> Option<&str> {
        self.config.backend_url.as_deref()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
