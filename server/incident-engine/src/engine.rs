//! Core engine: owns incidents, rotation and audit trail; keeps metrics current.
//!
//! Every mutation goes through `&mut Engine` and refreshes the metrics snapshot
//! before returning, so readers never see stale aggregates.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::audit::AuditLog;
use crate::config::Config;
use crate::error::EngineError;
use crate::normalize;
use crate::rotation::Rotation;
use crate::seed;
use crate::stats::{self, MetricsSnapshot};
use crate::store::IncidentStore;
use crate::types::*;

/// Audit entries kept in memory, as a multiple of `Config::audit_limit`.
const AUDIT_RETENTION_FACTOR: usize = 4;

pub struct Engine {
  config: Config,
  incidents: IncidentStore,
  rotation: Rotation,
  audit: AuditLog,
  metrics: MetricsSnapshot,
}

impl Engine {
  pub fn new(config: Config) -> Result<Self, EngineError> {
    let rotation = Rotation::new(config.rotation.clone())?;
    let incidents = if config.seed_demo {
      IncidentStore::from_incidents(seed::demo_incidents()?)
    } else {
      IncidentStore::new()
    };
    let metrics = stats::compute(incidents.list());
    let audit = AuditLog::with_retention(config.audit_limit.max(1) * AUDIT_RETENTION_FACTOR);
    Ok(Self {
      config,
      incidents,
      rotation,
      audit,
      metrics,
    })
  }

  pub fn with_defaults() -> Result<Self, EngineError> {
    Self::new(Config::default())
  }

  // -------------------------------------------------------------------------
  // Incidents
  // -------------------------------------------------------------------------

  /// Validate an inbound alert and open a new incident for it.
  pub fn create_incident(&mut self, raw: &InboundAlert) -> Result<Incident, EngineError> {
    self.create_incident_at(raw, Utc::now())
  }

  pub fn create_incident_at(
    &mut self,
    raw: &InboundAlert,
    at: DateTime<Utc>,
  ) -> Result<Incident, EngineError> {
    let alert = normalize::normalize(raw)?;
    let assignee = self.rotation.current().to_string();
    let incident = self.incidents.create(&alert, Some(&assignee), at).clone();

    self.audit.record(
      AuditAction::AlertReceived,
      Some(incident.id),
      incident.title.clone(),
      at,
    );
    self.refresh_metrics();
    info!(
      id = incident.id,
      service = %incident.service,
      severity = %incident.severity,
      assigned_to = %assignee,
      "incident created"
    );
    Ok(incident)
  }

  pub fn acknowledge(&mut self, id: u64) -> Result<Incident, EngineError> {
    self.acknowledge_at(id, Utc::now())
  }

  pub fn acknowledge_at(&mut self, id: u64, at: DateTime<Utc>) -> Result<Incident, EngineError> {
    let (incident, changed) = self.incidents.acknowledge(id, at)?;
    let incident = incident.clone();

    if changed {
      self.audit.record(AuditAction::Acknowledge, Some(id), "", at);
      info!(id, "incident acknowledged");
    } else {
      debug!(id, status = ?incident.status, "acknowledge is a no-op");
    }
    self.refresh_metrics();
    Ok(incident)
  }

  pub fn resolve(&mut self, id: u64) -> Result<Incident, EngineError> {
    self.resolve_at(id, Utc::now())
  }

  pub fn resolve_at(&mut self, id: u64, at: DateTime<Utc>) -> Result<Incident, EngineError> {
    let (incident, changed) = self.incidents.resolve(id, at)?;
    let incident = incident.clone();

    if changed {
      self.audit.record(AuditAction::Resolve, Some(id), "", at);
      info!(id, "incident resolved");
    } else {
      debug!(id, "resolve is a no-op");
    }
    self.refresh_metrics();
    Ok(incident)
  }

  /// All incidents in creation order.
  pub fn list_incidents(&self) -> &[Incident] {
    self.incidents.list()
  }

  // -------------------------------------------------------------------------
  // On-call
  // -------------------------------------------------------------------------

  pub fn current_on_call(&self) -> OnCall {
    self.rotation.view()
  }

  pub fn rotate_on_call(&mut self) -> String {
    let current = self.rotation.rotate().to_string();
    self
      .audit
      .record(AuditAction::Rotate, None, current.clone(), Utc::now());
    info!(current = %current, "on-call rotated");
    current
  }

  pub fn shuffle_on_call_rotation(&mut self) -> Vec<String> {
    self.shuffle_on_call_rotation_with(&mut rand::thread_rng())
  }

  pub fn shuffle_on_call_rotation_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<String> {
    let rotation = self.rotation.shuffle(rng).to_vec();
    self
      .audit
      .record(AuditAction::Shuffle, None, rotation.join(","), Utc::now());
    info!(rotation = ?rotation, "on-call rotation shuffled");
    rotation
  }

  // -------------------------------------------------------------------------
  // Derived views
  // -------------------------------------------------------------------------

  pub fn metrics(&self) -> &MetricsSnapshot {
    &self.metrics
  }

  /// Newest audit entries, capped by `config.audit_limit`.
  pub fn recent_audit(&self) -> Vec<AuditEntry> {
    self.audit.recent(self.config.audit_limit)
  }

  fn refresh_metrics(&mut self) {
    self.metrics = stats::compute(self.incidents.list());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn ts(min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 9, 10, min, 0).unwrap()
  }

  fn make_inbound(service: &str, severity: &str) -> InboundAlert {
    InboundAlert {
      service: Some(service.into()),
      severity: Some(severity.into()),
      message: Some("it broke".into()),
    }
  }

  #[test]
  fn create_assigns_fresh_ids() {
    let mut engine = Engine::with_defaults().unwrap();
    let a = engine.create_incident(&make_inbound("api", "high")).unwrap();
    let b = engine.create_incident(&make_inbound("db", "critical")).unwrap();
    assert_ne!(a.id, b.id);
    assert!(a.acknowledged_at.is_none() && a.resolved_at.is_none());
    assert_eq!(b.severity, Severity::Critical);
  }

  #[test]
  fn new_incident_is_assigned_to_current_on_call() {
    let mut engine = Engine::with_defaults().unwrap();
    let first = engine.create_incident(&make_inbound("api", "high")).unwrap();
    assert_eq!(first.assigned_to.as_deref(), Some("alice"));

    engine.rotate_on_call();
    let second = engine.create_incident(&make_inbound("db", "low")).unwrap();
    assert_eq!(second.assigned_to.as_deref(), Some("bob"));

    // Reassignment is not retroactive.
    assert_eq!(engine.list_incidents()[0].assigned_to.as_deref(), Some("alice"));
  }

  #[test]
  fn invalid_alert_returns_error_and_creates_nothing() {
    let mut engine = Engine::with_defaults().unwrap();
    let err = engine.create_incident(&InboundAlert::default()).unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));
    assert!(engine.list_incidents().is_empty());
    assert_eq!(engine.metrics().incidents_total, 0);
  }

  #[test]
  fn metrics_follow_every_mutation() {
    let mut engine = Engine::with_defaults().unwrap();
    let id = engine.create_incident_at(&make_inbound("api", "high"), ts(0)).unwrap().id;
    assert_eq!(engine.metrics().incidents_open, 1);

    engine.acknowledge_at(id, ts(2)).unwrap();
    assert_eq!(engine.metrics().mtta_seconds, 120.0);
    assert_eq!(engine.metrics().mttr_seconds, 0.0);

    engine.resolve_at(id, ts(5)).unwrap();
    assert_eq!(engine.metrics().incidents_open, 0);
    assert_eq!(engine.metrics().mttr_seconds, 180.0);
  }

  #[test]
  fn repeated_transitions_keep_first_timestamps() {
    let mut engine = Engine::with_defaults().unwrap();
    let id = engine.create_incident_at(&make_inbound("api", "low"), ts(0)).unwrap().id;
    let first = engine.acknowledge_at(id, ts(1)).unwrap();
    let second = engine.acknowledge_at(id, ts(3)).unwrap();
    assert_eq!(first.acknowledged_at, second.acknowledged_at);

    let first = engine.resolve_at(id, ts(4)).unwrap();
    let second = engine.resolve_at(id, ts(8)).unwrap();
    assert_eq!(first.resolved_at, second.resolved_at);
  }

  #[test]
  fn unknown_id_is_not_found() {
    let mut engine = Engine::with_defaults().unwrap();
    assert!(matches!(engine.acknowledge(99), Err(EngineError::NotFound { id: 99 })));
    assert!(matches!(engine.resolve(99), Err(EngineError::NotFound { id: 99 })));
  }

  #[test]
  fn audit_records_only_real_transitions() {
    let mut engine = Engine::with_defaults().unwrap();
    let id = engine.create_incident_at(&make_inbound("api", "high"), ts(0)).unwrap().id;
    engine.acknowledge_at(id, ts(1)).unwrap();
    engine.acknowledge_at(id, ts(2)).unwrap();
    engine.resolve_at(id, ts(3)).unwrap();
    engine.resolve_at(id, ts(4)).unwrap();

    let actions: Vec<AuditAction> = engine.recent_audit().iter().map(|e| e.action).collect();
    assert_eq!(
      actions,
      vec![AuditAction::Resolve, AuditAction::Acknowledge, AuditAction::AlertReceived]
    );
  }

  #[test]
  fn audit_respects_configured_limit() {
    let mut engine = Engine::new(Config {
      audit_limit: 2,
      ..Config::default()
    })
    .unwrap();
    for _ in 0..5 {
      engine.rotate_on_call();
    }
    assert_eq!(engine.recent_audit().len(), 2);
  }

  #[test]
  fn audit_history_stays_bounded_under_load() {
    let mut engine = Engine::new(Config {
      audit_limit: 2,
      ..Config::default()
    })
    .unwrap();
    for _ in 0..1_000 {
      engine.rotate_on_call();
    }
    assert_eq!(engine.audit.recent(usize::MAX).len(), 2 * AUDIT_RETENTION_FACTOR);
    assert_eq!(engine.recent_audit()[0].id, 1_000);
  }

  #[test]
  fn rotate_cycles_back_to_start() {
    let mut engine = Engine::with_defaults().unwrap();
    assert_eq!(engine.current_on_call().current, "alice");
    assert_eq!(engine.rotate_on_call(), "bob");
    engine.rotate_on_call();
    assert_eq!(engine.rotate_on_call(), "alice");
  }

  #[test]
  fn shuffle_resets_current_to_first() {
    let mut engine = Engine::with_defaults().unwrap();
    engine.rotate_on_call();
    let mut rng = StdRng::seed_from_u64(3);
    let rotation = engine.shuffle_on_call_rotation_with(&mut rng);
    let view = engine.current_on_call();
    assert_eq!(view.rotation, rotation);
    assert_eq!(view.current, rotation[0]);
  }

  #[test]
  fn empty_rotation_config_is_rejected() {
    let err = Engine::new(Config {
      rotation: vec![],
      ..Config::default()
    })
    .err()
    .unwrap();
    assert!(err.to_string().contains("rotation"));
  }

  #[test]
  fn demo_seed_populates_store_and_metrics() {
    let mut engine = Engine::new(Config {
      seed_demo: true,
      ..Config::default()
    })
    .unwrap();
    assert_eq!(engine.metrics().incidents_total, 3);
    assert_eq!(engine.metrics().incidents_open, 2);
    // (15m + 10m) / 2 acked; 50m for the one resolved.
    assert_eq!(engine.metrics().mtta_seconds, 750.0);
    assert_eq!(engine.metrics().mttr_seconds, 3000.0);

    let created = engine.create_incident(&make_inbound("api", "high")).unwrap();
    assert_eq!(created.id, 4);
  }
}
