//! Incident Desk engine: in-memory incident lifecycle, on-call rotation and derived metrics.
//!
//! Incidents move Open -> Acknowledged -> Resolved (or straight Open -> Resolved); both
//! transitions are idempotent. MTTA/MTTR and open/total counts are recomputed after
//! every mutation.
//!
//! No DB, no network; pure computation + in-memory state.

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod rotation;
pub mod seed;
pub mod stats;
pub mod store;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::EngineError;
pub use stats::MetricsSnapshot;
pub use types::{InboundAlert, Incident, IncidentStatus, OnCall, Severity};
