use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use configs::AppConfig;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

use crate::routes::{self, AppState};
use service::{runtime, submissions::{SubmissionRepository, SubmissionStore}};

/// CORS for a fixed origin allow-list with credentials.
/// Methods and headers are mirrored since `*` is not allowed alongside credentials.
pub fn build_cors(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>().with_context(|| format!("invalid CORS origin {o:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Router over the given repository with the configured CORS policy.
pub fn build_app(repo: Arc<dyn SubmissionRepository>, cfg: &AppConfig) -> anyhow::Result<Router> {
    let cors = build_cors(&cfg.cors.allowed_origins)?;
    Ok(routes::build_router(AppState::new(repo), cors))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Build the app from `cfg` and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.data_file).await?;

    let store = SubmissionStore::new(&cfg.storage.data_file);
    info!(file = %store.path().display(), "submission store ready");
    let app = build_app(store, &cfg)?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, origins = ?cfg.cors.allowed_origins, "starting question bank server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
