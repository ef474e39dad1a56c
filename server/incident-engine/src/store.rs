//! Incident store: creation-ordered incidents with idempotent lifecycle transitions.
//!
//! Timestamps are passed in by the caller. A transition timestamp earlier than the
//! previous lifecycle timestamp is clamped up to it, so
//! `created_at <= acknowledged_at <= resolved_at` always holds.

use chrono::{DateTime, Utc};

use crate::error::EngineError;
use crate::normalize;
use crate::types::{Alert, Incident, IncidentStatus};

#[derive(Debug, Clone, Default)]
pub struct IncidentStore {
  incidents: Vec<Incident>,
}

impl IncidentStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Store pre-populated with existing incidents, kept in the given order.
  pub fn from_incidents(incidents: Vec<Incident>) -> Self {
    Self { incidents }
  }

  /// Max existing id + 1, or 1 when empty.
  pub fn next_id(&self) -> u64 {
    self.incidents.iter().map(|i| i.id).max().map_or(1, |max| max + 1)
  }

  pub fn create(&mut self, alert: &Alert, assignee: Option<&str>, at: DateTime<Utc>) -> &Incident {
    let incident = Incident {
      id: self.next_id(),
      title: normalize::incident_title(alert),
      service: alert.service.clone(),
      severity: alert.severity.clone(),
      status: IncidentStatus::Open,
      assigned_to: assignee.map(str::to_string),
      created_at: at,
      acknowledged_at: None,
      resolved_at: None,
    };
    self.incidents.push(incident);
    &self.incidents[self.incidents.len() - 1]
  }

  /// Acknowledge an open incident. Returns the incident and whether it changed.
  ///
  /// Already-acknowledged and already-resolved incidents are returned unchanged.
  pub fn acknowledge(
    &mut self,
    id: u64,
    at: DateTime<Utc>,
  ) -> Result<(&Incident, bool), EngineError> {
    let incident = self.find_mut(id)?;
    let changed = incident.status == IncidentStatus::Open;
    if changed {
      incident.acknowledged_at = Some(at.max(incident.created_at));
      incident.status = IncidentStatus::Acknowledged;
    }
    Ok((&*incident, changed))
  }

  /// Resolve an incident, acknowledged or not. Returns the incident and whether it changed.
  pub fn resolve(
    &mut self,
    id: u64,
    at: DateTime<Utc>,
  ) -> Result<(&Incident, bool), EngineError> {
    let incident = self.find_mut(id)?;
    let changed = incident.resolved_at.is_none();
    if changed {
      let floor = incident.acknowledged_at.unwrap_or(incident.created_at);
      incident.resolved_at = Some(at.max(floor));
      incident.status = IncidentStatus::Resolved;
    }
    Ok((&*incident, changed))
  }

  /// All incidents in creation order.
  pub fn list(&self) -> &[Incident] {
    &self.incidents
  }

  fn find_mut(&mut self, id: u64) -> Result<&mut Incident, EngineError> {
    self
      .incidents
      .iter_mut()
      .find(|i| i.id == id)
      .ok_or_else(|| EngineError::not_found(id))
  }
}
