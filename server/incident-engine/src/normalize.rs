//! Normalize inbound alerts into canonical internal Alert models.

use crate::error::EngineError;
use crate::types::*;

/// Validate an InboundAlert and turn it into a canonical Alert.
pub fn normalize(raw: &InboundAlert) -> Result<Alert, EngineError> {
  let service = required(&raw.service, "service")?;
  let severity = required(&raw.severity, "severity")?;

  let message = raw
    .message
    .as_deref()
    .map(str::trim)
    .filter(|m| !m.is_empty())
    .map(str::to_string);

  Ok(Alert {
    service: service.to_string(),
    severity: Severity::from_str_loose(severity),
    message,
  })
}

/// Incident title for an alert: "<service>: <message>", "alert" when no message.
pub fn incident_title(alert: &Alert) -> String {
  format!(
    "{}: {}",
    alert.service,
    alert.message.as_deref().unwrap_or("alert")
  )
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, EngineError> {
  match value.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(EngineError::validation(field, "is required")),
  }
}
