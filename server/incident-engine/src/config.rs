//! Engine configuration with sane defaults.

/// Startup settings for the incident engine.
#[derive(Debug, Clone)]
pub struct Config {
  /// Initial on-call rotation, in order. Must not be empty.
  pub rotation: Vec<String>,
  /// Max audit entries returned by a "recent" query.
  pub audit_limit: usize,
  /// Load the sample incidents on startup (dashboard demo).
  pub seed_demo: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      rotation: vec!["alice".into(), "bob".into(), "carol".into()],
      audit_limit: 30,
      seed_demo: false,
    }
  }
}
