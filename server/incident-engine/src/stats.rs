//! Derived incident statistics: totals, open count, MTTA, MTTR, per-severity counts.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::{Incident, Severity};

/// Content type for the Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Point-in-time metrics derived from the full incident set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
  pub incidents_total: u64,
  pub incidents_open: u64,
  /// Mean seconds to acknowledge; 0 when nothing is acknowledged.
  pub mtta_seconds: f64,
  /// Mean seconds to resolve; 0 when nothing is resolved.
  pub mttr_seconds: f64,
  pub incidents_by_severity: BTreeMap<Severity, u64>,
}

/// Recompute every metric from scratch.
pub fn compute(incidents: &[Incident]) -> MetricsSnapshot {
  let mut by_severity = BTreeMap::new();
  for incident in incidents {
    *by_severity.entry(incident.severity.clone()).or_insert(0) += 1;
  }

  MetricsSnapshot {
    incidents_total: incidents.len() as u64,
    incidents_open: incidents.iter().filter(|i| i.is_open()).count() as u64,
    mtta_seconds: mean(incidents.iter().filter_map(Incident::time_to_acknowledge)),
    mttr_seconds: mean(incidents.iter().filter_map(Incident::time_to_resolve)),
    incidents_by_severity: by_severity,
  }
}

/// Arithmetic mean, 0 for an empty sequence.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
  let (sum, count) = values.fold((0.0, 0u64), |(s, c), v| (s + v, c + 1));
  if count == 0 {
    0.0
  } else {
    sum / count as f64
  }
}

impl MetricsSnapshot {
  /// Render as Prometheus text: `# HELP`, `# TYPE`, then `<name> <value>` per gauge.
  pub fn render_prometheus(&self) -> String {
    let mut out = String::new();
    gauge(&mut out, "app_incidents_total", "Total incidents", &self.incidents_total.to_string());
    gauge(&mut out, "app_incidents_open", "Open incidents (not resolved)", &self.incidents_open.to_string());
    gauge(&mut out, "app_mtta_seconds", "Mean time to acknowledge in seconds", &format_seconds(self.mtta_seconds));
    gauge(&mut out, "app_mttr_seconds", "Mean time to resolve in seconds", &format_seconds(self.mttr_seconds));

    let _ = writeln!(out, "# HELP app_incidents_by_severity Incidents per severity");
    let _ = writeln!(out, "# TYPE app_incidents_by_severity gauge");
    for (severity, count) in &self.incidents_by_severity {
      let _ = writeln!(
        out,
        "app_incidents_by_severity{{severity=\"{}\"}} {}",
        escape_label(severity.as_str()),
        count
      );
    }
    out
  }
}

fn gauge(out: &mut String, name: &str, help: &str, value: &str) {
  let _ = writeln!(out, "# HELP {} {}", name, help);
  let _ = writeln!(out, "# TYPE {} gauge", name);
  let _ = writeln!(out, "{} {}", name, value);
}

/// Millisecond precision, no trailing zeros ("90", "1.5").
fn format_seconds(v: f64) -> String {
  let rounded = (v * 1000.0).round() / 1000.0;
  format!("{}", rounded)
}

fn escape_label(v: &str) -> String {
  v.replace('\\', "\\\\")
    .replace('"', "\\\"")
    .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::IncidentStatus;
  use chrono::{DateTime, Duration, TimeZone, Utc};

  fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 9, 9, 0, 0).unwrap()
  }

  fn incident(id: u64, ack_after: Option<i64>, resolve_after: Option<i64>) -> Incident {
    let created = t0();
    let acknowledged_at = ack_after.map(|s| created + Duration::seconds(s));
    let resolved_at = resolve_after.map(|s| created + Duration::seconds(s));
    Incident {
      id,
      title: format!("svc: {}", id),
      service: "svc".into(),
      severity: Severity::High,
      status: if resolved_at.is_some() {
        IncidentStatus::Resolved
      } else if acknowledged_at.is_some() {
        IncidentStatus::Acknowledged
      } else {
        IncidentStatus::Open
      },
      assigned_to: None,
      created_at: created,
      acknowledged_at,
      resolved_at,
    }
  }

  #[test]
  fn empty_store_metrics_are_zero() {
    let m = compute(&[]);
    assert_eq!(m.incidents_total, 0);
    assert_eq!(m.incidents_open, 0);
    assert_eq!(m.mtta_seconds, 0.0);
    assert_eq!(m.mttr_seconds, 0.0);
  }

  #[test]
  fn no_acks_or_resolutions_gives_zero_means() {
    let m = compute(&[incident(1, None, None), incident(2, None, None)]);
    assert_eq!(m.incidents_total, 2);
    assert_eq!(m.incidents_open, 2);
    assert_eq!(m.mtta_seconds, 0.0);
    assert_eq!(m.mttr_seconds, 0.0);
  }

  #[test]
  fn mtta_is_mean_over_acknowledged_only() {
    let m = compute(&[
      incident(1, Some(60), None),
      incident(2, Some(120), None),
      incident(3, None, None),
    ]);
    assert!((m.mtta_seconds - 90.0).abs() < 1e-9);
  }

  #[test]
  fn mttr_anchors_on_ack_or_creation() {
    // ack at 60, resolve at 300 -> 240; never acked, resolve at 100 -> 100.
    let m = compute(&[incident(1, Some(60), Some(300)), incident(2, None, Some(100))]);
    assert!((m.mttr_seconds - 170.0).abs() < 1e-9);
    assert_eq!(m.incidents_open, 0);
  }

  #[test]
  fn counts_by_severity() {
    let mut low = incident(2, None, None);
    low.severity = Severity::Low;
    let m = compute(&[incident(1, None, None), low, incident(3, None, None)]);
    assert_eq!(m.incidents_by_severity.get(&Severity::High), Some(&2));
    assert_eq!(m.incidents_by_severity.get(&Severity::Low), Some(&1));
  }

  #[test]
  fn exposition_lines_are_line_anchored() {
    let m = compute(&[incident(1, Some(60), Some(90))]);
    let text = m.render_prometheus();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"app_incidents_total 1"));
    assert!(lines.contains(&"app_incidents_open 0"));
    assert!(lines.contains(&"app_mtta_seconds 60"));
    assert!(lines.contains(&"app_mttr_seconds 30"));
    assert!(lines.contains(&"# TYPE app_mtta_seconds gauge"));
    assert!(lines.contains(&"app_incidents_by_severity{severity=\"high\"} 1"));
  }

  #[test]
  fn fractional_seconds_are_rounded_to_millis() {
    assert_eq!(format_seconds(1.5), "1.5");
    assert_eq!(format_seconds(2.0 / 3.0), "0.667");
    assert_eq!(format_seconds(0.0), "0");
  }

  #[test]
  fn label_values_are_escaped() {
    assert_eq!(escape_label("a\"b"), "a\\\"b");
  }
}
