use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::auth::{repo::file::FileIdentityRepository, IdentityRepository};
use service::random::{RandomSource, SeededRandom};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the identity file and seed the scorer from configuration.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    let path = cfg.storage.identity_path();
    let identities: Arc<dyn IdentityRepository> = Arc::new(FileIdentityRepository::open(path.clone()).await?);
    let registered = identities.count().await?;
    let rng: Arc<dyn RandomSource> = Arc::new(SeededRandom::from_optional_seed(cfg.mock.seed));
    info!(identities = %path.display(), registered, seeded = cfg.mock.seed.is_some(), "state ready");
    Ok(AppState::new(identities, rng))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{}: {e}", cfg.server.bind_addr())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c handler unavailable; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Build the app from `cfg` and serve it until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "resume boost api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
