// workflow_runner/src/tokens.rs

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Shared set of cancelled tokens. `cancel` steps write to it; other steps consult it
/// through the `cancelToken` key of their execution context.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry(Arc<RwLock<HashSet<String>>>);

impl TokenRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns `false` if the token was already cancelled.
  pub fn cancel(&self, token: &str) -> bool {
    self.0.write().insert(token.to_string())
  }

  pub fn is_cancelled(&self, token: &str) -> bool {
    self.0.read().contains(token)
  }
}
