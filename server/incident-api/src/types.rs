//! Request/response types for the API that are not engine models.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RotateResponse {
  pub current: String,
}

#[derive(Debug, Serialize)]
pub struct ShuffleResponse {
  pub rotation: Vec<String>,
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub error: String,
}
