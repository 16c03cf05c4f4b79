// stepwise/examples/basic_run.rs

use serde_json::json;
use stepwise::{NoopHandler, Run, RunResult, StepError, StepRunner};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StepError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Basic Run Example ---");

  // 1. Build a run from raw definitions. Each one is validated on the way in.
  let mut run = Run::from_definitions(&[
    json!({"action": "cancel", "token": "test"}),
    json!({"action": "delay", "duration": "test"}),
    json!({"action": "fetch-data"}),
    json!({"action": "invoke"}),
    json!({"action": "send-list"}),
    json!({"action": "send"}),
    json!({"action": "update-profile"}),
  ])?;
  info!(run_id = %run.run_id(), steps = run.len(), "Run composed.");

  // 2. Dispatch every step to a handler that performs no effect.
  let report = StepRunner::default().run_sequence(&mut run, &NoopHandler).await?;

  // 3. Inspect the results
  match report.result {
    RunResult::Completed => info!("Run completed, {} steps dispatched.", report.dispatched),
    RunResult::Suspended { step_id } => info!(%step_id, "Run suspended."),
  }
  for step in run.steps() {
    info!("- {} {} -> {}", step.id(), step.action(), step.meta().status());
  }

  assert!(run.is_finished());
  Ok(())
}
