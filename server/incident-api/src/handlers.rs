//! HTTP handlers for the incident API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use incident_engine::stats::EXPOSITION_CONTENT_TYPE;
use incident_engine::types::AuditEntry;
use incident_engine::{InboundAlert, Incident, OnCall};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{HealthResponse, RotateResponse, ShuffleResponse};

pub async fn health() -> Json<HealthResponse> {
  Json(HealthResponse { status: "ok" })
}

pub async fn list_incidents(State(state): State<Arc<AppState>>) -> Json<Vec<Incident>> {
  let engine = state.engine.lock().await;
  Json(engine.list_incidents().to_vec())
}

pub async fn ingest_alert(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<InboundAlert>, JsonRejection>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
  let Json(alert) = payload?;
  let incident = state.engine.lock().await.create_incident(&alert)?;
  Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn acknowledge(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Incident>, ApiError> {
  let id = parse_id(&id)?;
  let incident = state.engine.lock().await.acknowledge(id)?;
  Ok(Json(incident))
}

pub async fn resolve(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Incident>, ApiError> {
  let id = parse_id(&id)?;
  let incident = state.engine.lock().await.resolve(id)?;
  Ok(Json(incident))
}

pub async fn current_on_call(State(state): State<Arc<AppState>>) -> Json<OnCall> {
  Json(state.engine.lock().await.current_on_call())
}

pub async fn rotate_on_call(State(state): State<Arc<AppState>>) -> Json<RotateResponse> {
  let current = state.engine.lock().await.rotate_on_call();
  Json(RotateResponse { current })
}

pub async fn shuffle_on_call(State(state): State<Arc<AppState>>) -> Json<ShuffleResponse> {
  let rotation = state.engine.lock().await.shuffle_on_call_rotation();
  Json(ShuffleResponse { rotation })
}

pub async fn audit(State(state): State<Arc<AppState>>) -> Json<Vec<AuditEntry>> {
  Json(state.engine.lock().await.recent_audit())
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let body = state.engine.lock().await.metrics().render_prometheus();
  ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body)
}

/// Ids that are not unsigned integers cannot name an incident.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::UnknownIncident(raw.to_string()))
}
