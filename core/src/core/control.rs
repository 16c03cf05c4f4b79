// stepwise/src/core/control.rs

//! Signals returned by handler operations and the outcome of a whole run.

use crate::core::meta::StepId;
use crate::core::status::StepStatus;
use crate::error::StepError;

/// What a handler operation reports back for the step it was given.
/// The runner turns this into the matching status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
  /// The effect was performed.
  Processed,
  /// The effect is blocked on an external event. The run suspends at this step.
  Waiting,
  /// The handler chose not to perform the effect.
  Skipped,
}

impl StepOutcome {
  pub fn status(self) -> StepStatus {
    match self {
      StepOutcome::Processed => StepStatus::Processed,
      StepOutcome::Waiting => StepStatus::Waiting,
      StepOutcome::Skipped => StepStatus::Skipped,
    }
  }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
  /// Every step reached a terminal status.
  Completed,
  /// A step is `WAITING`; running the same sequence again resumes from it.
  Suspended { step_id: StepId },
}

/// Summary returned by the runner.
#[derive(Debug)]
pub struct RunReport {
  pub result: RunResult,
  /// Number of handler operations invoked during this call.
  pub dispatched: usize,
  /// Dispatch failures collected under `FailurePolicy::Continue`. Always empty under `Halt`.
  pub failures: Vec<StepError>,
}

impl RunReport {
  pub fn is_completed(&self) -> bool {
    self.result == RunResult::Completed
  }

  pub fn has_failures(&self) -> bool {
    !self.failures.is_empty()
  }
}
