mod backend;
mod config;
mod routes;
mod session;
mod state;
mod templates;

use std::sync::Arc;

use backend::{BackendApi, BackendClient};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::PortalConfig::from_env().expect("invalid configuration");

    // Initialize backend client (non-fatal: routes report misconfiguration if missing).
    let backend: Option<Arc<dyn BackendApi>> = match config.backend_url.as_deref() {
        Some(url) => {
            let client = BackendClient::new(url, config.timeouts).expect("backend client init failed");
            tracing::info!(backend_url = %url, timeout_secs = config.timeouts.request.as_secs(), "backend configured");
            let client: Arc<dyn BackendApi> = Arc::new(client);
            Some(client)
        }
        None => {
            tracing::warn!("BACKEND_URL not set; login and enrollment will report a server error");
            None
        }
    };

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let state = state::AppState::new(config, backend);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "attendance portal listening");
    axum::serve(listener, app).await.expect("server failed");
}
