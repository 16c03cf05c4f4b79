// stepwise/src/run/config.rs

//! Runner configuration.

use crate::error::StepError;
use std::str::FromStr;

/// What the runner does when a handler operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
  /// Mark the step `ERROR`, return the dispatch error and leave later steps untouched.
  #[default]
  Halt,
  /// Mark the step `ERROR`, record the error in the report and carry on with the next step.
  Continue,
}

impl FromStr for FailurePolicy {
  type Err = StepError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "halt" => Ok(FailurePolicy::Halt),
      "continue" => Ok(FailurePolicy::Continue),
      other => Err(StepError::Configuration {
        message: format!("unknown failure policy '{}', expected 'halt' or 'continue'", other),
      }),
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
  pub failure_policy: FailurePolicy,
}

impl RunnerConfig {
  pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
    self.failure_policy = failure_policy;
    self
  }
}
