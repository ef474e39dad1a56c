//! HTTP error mapping: engine errors and bad request bodies to status + JSON body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use incident_engine::EngineError;
use thiserror::Error;

use crate::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Engine(#[from] EngineError),

  #[error("invalid request body: {}", .0.body_text())]
  Body(#[from] JsonRejection),

  /// Path segment that is not a valid incident id.
  #[error("incident {0} not found")]
  UnknownIncident(String),

  /// Detail is logged, never sent to the client.
  #[error("internal: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Engine(EngineError::Validation { .. }) | Self::Body(_) => StatusCode::BAD_REQUEST,
      Self::Engine(EngineError::NotFound { .. }) | Self::UnknownIncident(_) => StatusCode::NOT_FOUND,
      Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn client_message(&self) -> String {
    match self {
      Self::Engine(EngineError::Validation { field, reason }) => format!("{} {}", field, reason),
      Self::Internal(_) => "internal server error".into(),
      other => other.to_string(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
    }
    (status, Json(ErrorBody { error: self.client_message() })).into_response()
  }
}
