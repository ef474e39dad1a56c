//! Sample incidents for a fresh dashboard: one open, one acknowledged, one resolved.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::EngineError;
use crate::types::{Incident, IncidentStatus, Severity};

fn at(day: u32, hour: u32, min: u32) -> Result<DateTime<Utc>, EngineError> {
  Utc
    .with_ymd_and_hms(2026, 2, day, hour, min, 0)
    .single()
    .ok_or_else(|| EngineError::validation("seed_demo", "invalid demo timestamp"))
}

pub fn demo_incidents() -> Result<Vec<Incident>, EngineError> {
  Ok(vec![
    Incident {
      id: 1,
      title: "DB latency".into(),
      service: "database".into(),
      severity: Severity::Critical,
      status: IncidentStatus::Open,
      assigned_to: Some("alice".into()),
      created_at: at(8, 8, 0)?,
      acknowledged_at: None,
      resolved_at: None,
    },
    Incident {
      id: 2,
      title: "API errors".into(),
      service: "api".into(),
      severity: Severity::High,
      status: IncidentStatus::Acknowledged,
      assigned_to: Some("bob".into()),
      created_at: at(9, 9, 30)?,
      acknowledged_at: Some(at(9, 9, 45)?),
      resolved_at: None,
    },
    Incident {
      id: 3,
      title: "Cache miss".into(),
      service: "cache".into(),
      severity: Severity::Low,
      status: IncidentStatus::Resolved,
      assigned_to: Some("carol".into()),
      created_at: at(7, 12, 0)?,
      acknowledged_at: Some(at(7, 12, 10)?),
      resolved_at: Some(at(7, 13, 0)?),
    },
  ])
}
