// stepwise/examples/error_handling.rs

use async_trait::async_trait;
use serde_json::json;
use std::convert::Infallible;
use stepwise::{
  CancelStep, CommandHandler, DelayStep, FailurePolicy, FetchDataStep, InvokeStep, Run, RunnerConfig, SendListStep,
  SendStep, StepError, StepOutcome, StepRunner, UpdateProfileStep,
};
use tracing::{error, info};

// 1. Define the error your handler operations return
#[derive(Debug, thiserror::Error)]
enum ExampleHandlerError {
  #[error("remote endpoint rejected the call: {0}")]
  Rejected(String),
}

// 2. A handler whose `invoke` always fails
struct FlakyHandler;

#[async_trait]
impl CommandHandler for FlakyHandler {
  type Error = ExampleHandlerError;

  async fn cancel(&self, _step: &CancelStep) -> Result<StepOutcome, Self::Error> {
    Ok(StepOutcome::Processed)
  }

  async fn delay(&self, _step: &DelayStep) -> Result<StepOutcome, Self::Error> {
    Ok(StepOutcome::Processed)
  }

  async fn fetch_data(&self, _step: &FetchDataStep) -> Result<StepOutcome, Self::Error> {
    Ok(StepOutcome::Processed)
  }

  async fn send(&self, _step: &SendStep) -> Result<StepOutcome, Self::Error> {
    Ok(StepOutcome::Processed)
  }

  async fn send_list(&self, _step: &SendListStep) -> Result<StepOutcome, Self::Error> {
    Ok(StepOutcome::Processed)
  }

  async fn invoke(&self, step: &InvokeStep) -> Result<StepOutcome, Self::Error> {
    Err(ExampleHandlerError::Rejected(format!("step {}", step.meta().step_id())))
  }

  async fn update_profile(&self, _step: &UpdateProfileStep) -> Result<StepOutcome, Self::Error> {
    Ok(StepOutcome::Processed)
  }
}

#[tokio::main]
async fn main() -> Result<(), Infallible> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: invalid definition, rejected before any run exists
  info!("\nScenario 1: missing 'duration' on a delay step");
  match Run::from_definitions(&[json!({"action": "delay"})]) {
    Ok(_) => error!("Run unexpectedly composed"),
    Err(e) => {
      info!("Composition failed as expected: {}", e);
      assert_eq!(e.field(), Some("duration"));
    }
  }

  // Scenario 2: handler failure under the default Halt policy
  info!("\nScenario 2: handler error halts the run");
  let definitions = [json!({"action": "send"}), json!({"action": "invoke"}), json!({"action": "update-profile"})];
  let mut run = Run::from_definitions(&definitions).unwrap_or_default();
  match StepRunner::default().run_sequence(&mut run, &FlakyHandler).await {
    Ok(report) => error!("Run unexpectedly succeeded: {:?}", report.result),
    Err(e @ StepError::Dispatch { .. }) => info!("Run halted as expected: {}", e),
    Err(other) => error!("Unexpected error kind: {}", other),
  }
  for step in run.steps() {
    info!("- {} -> {}", step.action(), step.meta().status());
  }

  // Scenario 3: same failure, Continue policy
  info!("\nScenario 3: handler error collected, run continues");
  let mut run = Run::from_definitions(&definitions).unwrap_or_default();
  let runner = StepRunner::new(RunnerConfig::default().with_failure_policy(FailurePolicy::Continue));
  if let Ok(report) = runner.run_sequence(&mut run, &FlakyHandler).await {
    info!("Run finished with {} failure(s).", report.failures.len());
    for failure in &report.failures {
      info!("  {}", failure);
    }
    assert!(run.is_finished());
  }

  Ok(())
}
