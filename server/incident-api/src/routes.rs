//! Router assembly: API routes, dashboard fallback, and cross-cutting layers.

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the full application. With `static_dir`, unknown paths are served from it,
/// falling back to its `index.html` so client-side routes resolve.
pub fn router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
  let api = Router::new()
    .route("/health", get(handlers::health))
    .route("/metrics", get(handlers::metrics))
    .route("/api/v1/incidents", get(handlers::list_incidents))
    .route("/api/v1/alerts", post(handlers::ingest_alert))
    .route("/api/v1/incidents/:id/acknowledge", put(handlers::acknowledge))
    .route("/api/v1/incidents/:id/resolve", put(handlers::resolve))
    .route("/api/v1/oncall/current", get(handlers::current_on_call))
    .route("/api/v1/oncall/rotate", post(handlers::rotate_on_call))
    .route("/api/v1/oncall/shuffle", post(handlers::shuffle_on_call))
    .route("/api/v1/audit", get(handlers::audit));

  let app = match static_dir {
    Some(dir) => api.fallback_service(
      ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
    ),
    None => api,
  };

  app
    .layer(CatchPanicLayer::custom(panic_response))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
  let detail = if let Some(s) = err.downcast_ref::<String>() {
    s.clone()
  } else if let Some(s) = err.downcast_ref::<&str>() {
    s.to_string()
  } else {
    "unknown panic".to_string()
  };
  ApiError::Internal(detail).into_response()
}
