//! HTTP JSON API for EduGenius flows (axum).
//!
//! Exposes each catalog flow as `POST /api/flows/{name}` plus a catalog
//! listing, a health probe, and the notification feed. Startup loads config
//! into the environment, builds the flow registry (with any prompt overrides)
//! and the shared [`AppState`], then serves plain request/response JSON; the
//! flow contract itself stays in the `edugenius` crate.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`AppState`].

mod app;
mod response;
mod routes;

pub use app::AppState;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Binds `SERVE_ADDR` (default `127.0.0.1:8080`) and serves until the process
/// exits. Loads `.env`/XDG config into the environment first.
pub async fn run_serve() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    config::load_and_apply("edugenius", None)?;
    let state = Arc::new(AppState::from_env()?);
    let addr = std::env::var("SERVE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    run_serve_on_listener(listener, state).await
}

/// Serves on an existing listener. Used by tests (bind `127.0.0.1:0`, then
/// pass the listener and a state built around a mock model).
pub async fn run_serve_on_listener(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!("EduGenius flow server listening on http://{}", addr);
    axum::serve(listener, app::router(state)).await?;
    Ok(())
}
