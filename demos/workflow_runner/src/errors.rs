// workflow_runner/src/errors.rs

use stepwise::StepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Could not read workflow file '{path}': {source}")]
  WorkflowFile {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Workflow file is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Could not serialize step records: {0}")]
  Output(#[source] serde_json::Error),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from] // Allows conversion from stepwise::StepError
    source: StepError,
  },

  #[error("Run finished with {0} failed step(s).")]
  FailedSteps(usize),
}

/// Errors raised by the demo's command handler operations.
#[derive(Debug, Error)]
pub enum CommandError {
  #[error("Invalid delay duration '{duration}': {reason}")]
  InvalidDuration { duration: String, reason: String },
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
