// workflow_runner/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use stepwise::FailurePolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub workflow_file: String,
  pub failure_policy: FailurePolicy,
  pub tenant_id: Option<String>,
  /// Delays longer than this are not slept in-process; the step is left WAITING.
  pub max_delay: Duration,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  pub(crate) fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let workflow_file =
      get_env("WORKFLOW_FILE").ok_or_else(|| AppError::Config("Missing environment variable 'WORKFLOW_FILE'".into()))?;

    let failure_policy = get_env("FAILURE_POLICY")
      .unwrap_or_else(|| "halt".to_string())
      .parse::<FailurePolicy>()
      .map_err(|e| AppError::Config(format!("Invalid FAILURE_POLICY: {}", e)))?;

    let tenant_id = get_env("TENANT_ID").filter(|t| !t.is_empty());

    let max_delay_ms = get_env("MAX_DELAY_MS")
      .unwrap_or_else(|| "5000".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid MAX_DELAY_MS: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      workflow_file,
      failure_policy,
      tenant_id,
      max_delay: Duration::from_millis(max_delay_ms),
    })
  }
}
