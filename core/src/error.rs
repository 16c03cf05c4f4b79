// stepwise/src/error.rs
use crate::core::action::Action;
use crate::core::meta::{RunId, StepId};
use crate::core::status::StepStatus;
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
  /// Raw input failed its kind-specific schema check. `action` is `None` when the
  /// `action` field itself could not be read.
  #[error("Invalid {} step definition: field '{field}' {reason}", .action.map_or("unknown", Action::as_str))]
  Validation {
    action: Option<Action>,
    field: String,
    reason: String,
  },

  #[error("Unknown or unsupported action: '{action}'")]
  UnknownAction { action: String },

  #[error("Dispatch of {action} step {step_id} (run {run_id}) failed. Source: {source}")]
  Dispatch {
    step_id: StepId,
    run_id: RunId,
    action: Action,
    #[source]
    source: AnyhowError,
  },

  #[error("Step {step_id} cannot move from {from} to {to}")]
  InvalidTransition {
    step_id: StepId,
    from: StepStatus,
    to: StepStatus,
  },

  #[error("Configuration error: {message}")]
  Configuration { message: String },

  #[error("Internal stepwise error: {0}")]
  Internal(String),
}

impl StepError {
  pub(crate) fn validation(action: Option<Action>, field: impl Into<String>, reason: impl Into<String>) -> Self {
    StepError::Validation {
      action,
      field: field.into(),
      reason: reason.into(),
    }
  }

  /// Name of the offending field for validation failures.
  pub fn field(&self) -> Option<&str> {
    match self {
      StepError::Validation { field, .. } => Some(field),
      _ => None,
    }
  }
}

impl From<AnyhowError> for StepError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a StepError that travelled through anyhow instead of nesting it.
    match err.downcast::<StepError>() {
      Ok(step_err) => step_err,
      Err(other) => StepError::Internal(format!("{:#}", other)),
    }
  }
}

pub type StepResult<T, E = StepError> = std::result::Result<T, E>;
