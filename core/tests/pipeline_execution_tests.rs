// tests/pipeline_execution_tests.rs
mod common;

use common::*;
use serde_json::json;
use serial_test::serial;
use stepwise::{
  Action, FailurePolicy, NoopHandler, Run, RunResult, RunnerConfig, Step, StepRunner, StepStatus,
};

#[tokio::test]
#[serial]
async fn test_runner_dispatches_every_step_in_order() {
  setup_tracing();
  let mut run = Run::from_definitions(&Action::ALL.map(definition)).unwrap();
  let handler = RecordingHandler::new();

  let report = StepRunner::default().run_sequence(&mut run, &handler).await.unwrap();

  assert_eq!(report.result, RunResult::Completed);
  assert_eq!(report.dispatched, Action::ALL.len());
  assert!(!report.has_failures());
  assert_eq!(handler.actions(), Action::ALL.to_vec());

  let expected_ids: Vec<_> = run.steps().iter().map(Step::id).collect();
  let seen_ids: Vec<_> = handler.calls().iter().map(|c| c.step_id).collect();
  assert_eq!(seen_ids, expected_ids);
  assert!(run.steps().iter().all(|s| s.meta().status() == StepStatus::Processed));
  assert!(run.is_finished());
}

#[tokio::test]
#[serial]
async fn test_cancel_delay_send_scenario() {
  setup_tracing();
  let mut run = Run::from_definitions(&[
    json!({"action": "cancel", "token": "abc"}),
    json!({"action": "delay", "duration": "1s"}),
    json!({"action": "send"}),
  ])
  .unwrap();
  let handler = RecordingHandler::new();

  StepRunner::default().run_sequence(&mut run, &handler).await.unwrap();

  let calls = handler.calls();
  assert_eq!(calls.len(), 3);
  assert_eq!(handler.actions(), vec![Action::Cancel, Action::Delay, Action::Send]);
  assert_eq!(calls[0].payload.as_deref(), Some("abc"));
  assert_eq!(calls[1].payload.as_deref(), Some("1s"));
}

#[tokio::test]
#[serial]
async fn test_empty_sequence_runs_nothing() {
  setup_tracing();
  let handler = RecordingHandler::new();
  let mut steps: Vec<Step> = Vec::new();

  let report = StepRunner::default().run(&mut steps, &handler).await.unwrap();

  assert_eq!(report.result, RunResult::Completed);
  assert_eq!(report.dispatched, 0);
  assert!(handler.calls().is_empty());
}

#[tokio::test]
#[serial]
async fn test_status_history_for_processed_step() {
  setup_tracing();
  let mut run = Run::from_definitions(&[json!({"action": "invoke"})]).unwrap();

  StepRunner::default().run_sequence(&mut run, &NoopHandler).await.unwrap();

  let history: Vec<_> = run.steps()[0].meta().history().iter().map(|c| (c.from, c.to)).collect();
  assert_eq!(
    history,
    vec![
      (StepStatus::NotProcessed, StepStatus::Processing),
      (StepStatus::Processing, StepStatus::Processed),
    ]
  );
}

#[tokio::test]
#[serial]
async fn test_skipped_outcome_marks_step_skipped() {
  setup_tracing();
  let mut run = Run::from_definitions(&[json!({"action": "send"}), json!({"action": "send-list"})]).unwrap();
  let handler = RecordingHandler::new().skipping(Action::Send);

  let report = StepRunner::default().run_sequence(&mut run, &handler).await.unwrap();

  assert!(report.is_completed());
  assert_eq!(run.steps()[0].meta().status(), StepStatus::Skipped);
  assert_eq!(run.steps()[1].meta().status(), StepStatus::Processed);
}

#[tokio::test]
#[serial]
async fn test_waiting_step_suspends_and_resumes() {
  setup_tracing();
  let mut run = Run::from_definitions(&[
    json!({"action": "send"}),
    json!({"action": "delay", "duration": "5m"}),
    json!({"action": "update-profile"}),
  ])
  .unwrap();
  let delay_id = run.steps()[1].id();
  let handler = RecordingHandler::new().waiting_once_on(Action::Delay);
  let runner = StepRunner::default();

  let first = runner.run_sequence(&mut run, &handler).await.unwrap();
  assert_eq!(first.result, RunResult::Suspended { step_id: delay_id });
  assert_eq!(first.dispatched, 2);
  assert_eq!(run.steps()[1].meta().status(), StepStatus::Waiting);
  assert_eq!(run.steps()[2].meta().status(), StepStatus::NotProcessed);

  let second = runner.run_sequence(&mut run, &handler).await.unwrap();
  assert_eq!(second.result, RunResult::Completed);
  // The processed `send` step is not dispatched again.
  assert_eq!(second.dispatched, 2);
  assert_eq!(
    handler.actions(),
    vec![Action::Send, Action::Delay, Action::Delay, Action::UpdateProfile]
  );

  let delay_statuses: Vec<_> = run.steps()[1].meta().history().iter().map(|c| c.to).collect();
  assert_eq!(
    delay_statuses,
    vec![
      StepStatus::Processing,
      StepStatus::Waiting,
      StepStatus::Processing,
      StepStatus::Processed,
    ]
  );
}

#[tokio::test]
#[serial]
async fn test_finished_run_is_not_dispatched_again() {
  setup_tracing();
  let mut run = Run::from_definitions(&[json!({"action": "fetch-data"})]).unwrap();
  let handler = RecordingHandler::new();
  let runner = StepRunner::new(RunnerConfig::default().with_failure_policy(FailurePolicy::Continue));

  runner.run_sequence(&mut run, &handler).await.unwrap();
  let again = runner.run_sequence(&mut run, &handler).await.unwrap();

  assert_eq!(again.dispatched, 0);
  assert_eq!(handler.calls().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_dispatching_twice_is_independent() {
  setup_tracing();
  let step = Step::from_raw(&json!({"action": "cancel", "token": "abc"}), stepwise::RunId::generate()).unwrap();
  let first = RecordingHandler::new();
  let second = RecordingHandler::new();

  let a = step.dispatch(&first).await.unwrap();
  let b = step.dispatch(&second).await.unwrap();

  assert_eq!(a, b);
  assert_eq!(first.calls(), second.calls());
  assert_eq!(first.calls().len(), 1);
  assert_eq!(first.calls()[0].step_id, step.id());
  // Dispatch alone never changes the step.
  assert_eq!(step.meta().status(), StepStatus::NotProcessed);
}
