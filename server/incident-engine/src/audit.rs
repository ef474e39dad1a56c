//! Audit trail of state-changing actions, bounded to a retention window.
//!
//! Entry ids keep increasing after old entries are evicted.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::types::{AuditAction, AuditEntry};

#[derive(Debug, Clone)]
pub struct AuditLog {
  entries: VecDeque<AuditEntry>,
  retention: usize,
  next_id: u64,
}

impl AuditLog {
  /// Keeps at most `retention` entries (at least one), dropping the oldest first.
  pub fn with_retention(retention: usize) -> Self {
    let retention = retention.max(1);
    Self {
      entries: VecDeque::with_capacity(retention),
      retention,
      next_id: 1,
    }
  }

  pub fn record(
    &mut self,
    action: AuditAction,
    incident_id: Option<u64>,
    detail: impl Into<String>,
    at: DateTime<Utc>,
  ) -> &AuditEntry {
    if self.entries.len() == self.retention {
      self.entries.pop_front();
    }
    let entry = AuditEntry {
      id: self.next_id,
      action,
      incident_id,
      detail: detail.into(),
      timestamp: at,
    };
    self.next_id += 1;
    self.entries.push_back(entry);
    &self.entries[self.entries.len() - 1]
  }

  /// Newest first, at most `limit` entries.
  pub fn recent(&self, limit: usize) -> Vec<AuditEntry> {
    self.entries.iter().rev().take(limit).cloned().collect()
  }
}
