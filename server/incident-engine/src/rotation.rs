//! On-call rotation: ordered names with a pointer to whoever is on call now.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::types::OnCall;

/// Non-empty ordered rotation. `index` is always in bounds.
#[derive(Debug, Clone)]
pub struct Rotation {
  names: Vec<String>,
  index: usize,
}

impl Rotation {
  /// Build a rotation starting at the first name. Blank names are dropped.
  pub fn new(names: Vec<String>) -> Result<Self, EngineError> {
    let names: Vec<String> = names
      .into_iter()
      .map(|n| n.trim().to_string())
      .filter(|n| !n.is_empty())
      .collect();
    if names.is_empty() {
      return Err(EngineError::validation("rotation", "must not be empty"));
    }
    Ok(Self { names, index: 0 })
  }

  pub fn current(&self) -> &str {
    &self.names[self.index]
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn view(&self) -> OnCall {
    OnCall {
      current: self.current().to_string(),
      rotation: self.names.clone(),
    }
  }

  /// Advance one step, wrapping at the end. Returns the new on-call name.
  pub fn rotate(&mut self) -> &str {
    self.index = (self.index + 1) % self.names.len();
    self.current()
  }

  /// Uniform (Fisher-Yates) permutation of the names; resets to the first one.
  pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[String] {
    self.names.shuffle(rng);
    self.index = 0;
    &self.names
  }
}
