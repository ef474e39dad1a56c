//! Binary entrypoint for the incident API.

use std::sync::Arc;

use incident_api::{ApiConfig, AppState};
use incident_engine::Engine;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = ApiConfig::from_env()?;
  let engine = Engine::new(config.engine.clone())?;
  let state = Arc::new(AppState::new(engine));

  if !config.static_dir.join("index.html").is_file() {
    warn!(dir = %config.static_dir.display(), "dashboard index.html not found; non-API paths will 404");
  }
  let app = incident_api::router(state, Some(&config.static_dir));

  let addr = config.addr();
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!(%addr, rotation = ?config.engine.rotation, seed_demo = config.engine.seed_demo, "incident-api listening");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!("incident-api stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
}
