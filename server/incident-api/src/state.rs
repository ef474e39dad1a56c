//! Shared application state.

use incident_engine::Engine;
use tokio::sync::Mutex;

/// One engine, one lock: every read and mutation is serialized through it.
pub struct AppState {
  pub engine: Mutex<Engine>,
}

impl AppState {
  pub fn new(engine: Engine) -> Self {
    Self {
      engine: Mutex::new(engine),
    }
  }
}
