//! Service configuration from environment variables.
//!
//! | Variable          | Default             |
//! |-------------------|---------------------|
//! | `HOST`            | `127.0.0.1`         |
//! | `PORT`            | `3000`              |
//! | `STATIC_DIR`      | `<crate>/dist`      |
//! | `ONCALL_ROTATION` | `alice,bob,carol`   |
//! | `AUDIT_LIMIT`     | `30`                |
//! | `SEED_DEMO`       | `false`             |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("config: {key}={value:?}: {reason}")]
pub struct ConfigError {
  pub key: &'static str,
  pub value: String,
  pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub host: IpAddr,
  pub port: u16,
  /// Dashboard build directory served for non-API paths.
  pub static_dir: PathBuf,
  pub engine: incident_engine::Config,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      host: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 3000,
      static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/dist")),
      engine: incident_engine::Config::default(),
    }
  }
}

impl ApiConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from any key lookup; unset keys keep their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Some(v) = lookup("HOST") {
      config.host = parse("HOST", &v)?;
    }
    if let Some(v) = lookup("PORT") {
      config.port = parse("PORT", &v)?;
    }
    if let Some(v) = lookup("STATIC_DIR") {
      config.static_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("ONCALL_ROTATION") {
      let names: Vec<String> = v
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
      if names.is_empty() {
        return Err(invalid("ONCALL_ROTATION", &v, "needs at least one name"));
      }
      config.engine.rotation = names;
    }
    if let Some(v) = lookup("AUDIT_LIMIT") {
      config.engine.audit_limit = parse("AUDIT_LIMIT", &v)?;
    }
    if let Some(v) = lookup("SEED_DEMO") {
      config.engine.seed_demo = parse_flag("SEED_DEMO", &v)?;
    }

    Ok(config)
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  value
    .trim()
    .parse()
    .map_err(|e: T::Err| invalid(key, value, &e.to_string()))
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" | "" => Ok(false),
    _ => Err(invalid(key, value, "expected true|false")),
  }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
  ConfigError {
    key,
    value: value.to_string(),
    reason: reason.to_string(),
  }
}
