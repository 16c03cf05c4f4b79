// workflow_runner/src/main.rs

mod config;
mod errors;
mod handler;
mod tokens;
mod workflow;

use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};
use crate::handler::AppCommandHandler;
use crate::tokens::TokenRegistry;
use stepwise::{RunResult, RunnerConfig, StepRunner};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[tokio::main]
async fn main() -> AppResult<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting workflow runner...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e);
    }
  };

  let mut run = workflow::load_run(&app_config.workflow_file, app_config.tenant_id.as_deref())?;

  let handler = AppCommandHandler::new(TokenRegistry::new(), app_config.max_delay);
  let runner = StepRunner::new(RunnerConfig::default().with_failure_policy(app_config.failure_policy));
  let outcome = runner.run_sequence(&mut run, &handler).await;

  // Print the step records whatever happened, so the run can be inspected or resumed.
  println!("{}", serde_json::to_string_pretty(run.steps()).map_err(AppError::Output)?);

  let report = outcome?;
  match report.result {
    RunResult::Completed => tracing::info!(dispatched = report.dispatched, "Run completed."),
    RunResult::Suspended { step_id } => tracing::info!(%step_id, "Run suspended on a waiting step."),
  }
  for failure in &report.failures {
    tracing::error!(error = %failure, "Step failed.");
  }
  if report.has_failures() {
    return Err(AppError::FailedSteps(report.failures.len()));
  }
  Ok(())
}
