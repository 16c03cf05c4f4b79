// stepwise/src/core/status.rs

//! Processing status of a step and the transitions allowed between statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepStatus {
  #[default]
  #[serde(rename = "NOT PROCESSED")]
  NotProcessed,
  #[serde(rename = "PROCESSING")]
  Processing,
  /// Blocked on an external event (delay expiry, cancel token). Resumes to `Processing`.
  #[serde(rename = "WAITING")]
  Waiting,
  #[serde(rename = "PROCESSED")]
  Processed,
  #[serde(rename = "ERROR")]
  Error,
  #[serde(rename = "SKIPPED")]
  Skipped,
}

impl StepStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      StepStatus::NotProcessed => "NOT PROCESSED",
      StepStatus::Processing => "PROCESSING",
      StepStatus::Waiting => "WAITING",
      StepStatus::Processed => "PROCESSED",
      StepStatus::Error => "ERROR",
      StepStatus::Skipped => "SKIPPED",
    }
  }

  /// Terminal statuses are never left once reached.
  pub fn is_terminal(self) -> bool {
    matches!(self, StepStatus::Processed | StepStatus::Error | StepStatus::Skipped)
  }

  pub fn can_transition_to(self, to: StepStatus) -> bool {
    use StepStatus::*;
    match self {
      NotProcessed => matches!(to, Processing | Skipped),
      Processing => matches!(to, Processed | Error | Skipped | Waiting),
      Waiting => matches!(to, Processing | Error | Skipped),
      Processed | Error | Skipped => false,
    }
  }
}

impl fmt::Display for StepStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
