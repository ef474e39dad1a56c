//! Incident Desk API
//!
//! HTTP service over the in-memory incident engine: alerts, incident lifecycle,
//! on-call rotation, audit trail, metrics, and the dashboard.
//! Bind to 127.0.0.1 by default.

pub mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod types;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
