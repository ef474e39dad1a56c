//! Core types for the incident engine (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract: what the caller sends)
// ---------------------------------------------------------------------------

/// One inbound alert. Every field is optional on the wire so a missing
/// `service`/`severity` surfaces as a validation error, not a parse error.
/// Unknown fields are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundAlert {
  #[serde(default)]
  pub service: Option<String>,
  #[serde(default)]
  pub severity: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Severity (open set)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
  Critical,
  High,
  Low,
  /// Anything else the alert source sends, kept verbatim.
  Other(String),
}

impl Severity {
  pub fn from_str_loose(s: &str) -> Self {
    match s.to_ascii_lowercase().as_str() {
      "critical" => Self::Critical,
      "high" => Self::High,
      "low" => Self::Low,
      _ => Self::Other(s.to_string()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Critical => "critical",
      Self::High => "high",
      Self::Low => "low",
      Self::Other(s) => s,
    }
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<String> for Severity {
  fn from(s: String) -> Self {
    Self::from_str_loose(&s)
  }
}

impl From<Severity> for String {
  fn from(s: Severity) -> Self {
    s.as_str().to_string()
  }
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// Canonical alert after normalization + validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
  pub service: String,
  pub severity: Severity,
  pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Incident
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
  Open,
  Acknowledged,
  Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
  pub id: u64,
  pub title: String,
  pub service: String,
  pub severity: Severity,
  pub status: IncidentStatus,
  /// Whoever was on call when the incident was opened.
  #[serde(default)]
  pub assigned_to: Option<String>,
  pub created_at: DateTime<Utc>,
  pub acknowledged_at: Option<DateTime<Utc>>,
  pub resolved_at: Option<DateTime<Utc>>,
}

impl Incident {
  pub fn is_open(&self) -> bool {
    self.resolved_at.is_none()
  }

  /// Seconds from creation to acknowledgment, if acknowledged.
  pub fn time_to_acknowledge(&self) -> Option<f64> {
    self
      .acknowledged_at
      .map(|ack| seconds_between(self.created_at, ack))
  }

  /// Seconds from acknowledgment (or creation, if never acknowledged) to resolution.
  pub fn time_to_resolve(&self) -> Option<f64> {
    let anchor = self.acknowledged_at.unwrap_or(self.created_at);
    self
      .resolved_at
      .map(|resolved| seconds_between(anchor, resolved))
  }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
  (to - from).num_milliseconds() as f64 / 1000.0
}

// ---------------------------------------------------------------------------
// On-call views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnCall {
  pub current: String,
  pub rotation: Vec<String>,
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
  AlertReceived,
  Acknowledge,
  Resolve,
  Rotate,
  Shuffle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
  pub id: u64,
  pub action: AuditAction,
  pub incident_id: Option<u64>,
  pub detail: String,
  pub timestamp: DateTime<Utc>,
}
