// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use stepwise::{
  Action, CancelStep, CommandHandler, DelayStep, FetchDataStep, InvokeStep, SendListStep, SendStep, StepId,
  StepMeta, StepOutcome, UpdateProfileStep,
};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test handler failed: {0}")]
  Handler(String),
}

/// One observed handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
  pub action: Action,
  pub step_id: StepId,
  /// Cancel token or delay duration, when the step carries one.
  pub payload: Option<String>,
}

/// Handler that records every invocation and can be told to fail, wait or skip per action.
#[derive(Default)]
pub struct RecordingHandler {
  calls: Mutex<Vec<Call>>,
  fail_on: Vec<Action>,
  skip_on: Vec<Action>,
  wait_once_on: Vec<Action>,
  unsupported: Vec<Action>,
  already_waited: Mutex<HashSet<StepId>>,
}

impl RecordingHandler {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing_on(mut self, action: Action) -> Self {
    self.fail_on.push(action);
    self
  }

  pub fn skipping(mut self, action: Action) -> Self {
    self.skip_on.push(action);
    self
  }

  /// First dispatch of a step with `action` reports `Waiting`, later ones `Processed`.
  pub fn waiting_once_on(mut self, action: Action) -> Self {
    self.wait_once_on.push(action);
    self
  }

  pub fn without(mut self, action: Action) -> Self {
    self.unsupported.push(action);
    self
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().clone()
  }

  pub fn actions(&self) -> Vec<Action> {
    self.calls.lock().iter().map(|c| c.action).collect()
  }

  fn record(&self, action: Action, meta: &StepMeta, payload: Option<&str>) -> Result<StepOutcome, TestError> {
    let step_id = meta.step_id();
    self.calls.lock().push(Call {
      action,
      step_id,
      payload: payload.map(str::to_string),
    });
    tracing::debug!(target: "test_handlers", %action, %step_id, "recorded");

    if self.fail_on.contains(&action) {
      return Err(TestError::Handler(format!("{} refused", action)));
    }
    if self.skip_on.contains(&action) {
      return Ok(StepOutcome::Skipped);
    }
    if self.wait_once_on.contains(&action) && self.already_waited.lock().insert(step_id) {
      return Ok(StepOutcome::Waiting);
    }
    Ok(StepOutcome::Processed)
  }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
  type Error = TestError;

  async fn cancel(&self, step: &CancelStep) -> Result<StepOutcome, TestError> {
    self.record(Action::Cancel, step.meta(), Some(step.token()))
  }

  async fn delay(&self, step: &DelayStep) -> Result<StepOutcome, TestError> {
    self.record(Action::Delay, step.meta(), Some(step.duration()))
  }

  async fn fetch_data(&self, step: &FetchDataStep) -> Result<StepOutcome, TestError> {
    self.record(Action::FetchData, step.meta(), None)
  }

  async fn send(&self, step: &SendStep) -> Result<StepOutcome, TestError> {
    self.record(Action::Send, step.meta(), None)
  }

  async fn send_list(&self, step: &SendListStep) -> Result<StepOutcome, TestError> {
    self.record(Action::SendList, step.meta(), None)
  }

  async fn invoke(&self, step: &InvokeStep) -> Result<StepOutcome, TestError> {
    self.record(Action::Invoke, step.meta(), None)
  }

  async fn update_profile(&self, step: &UpdateProfileStep) -> Result<StepOutcome, TestError> {
    self.record(Action::UpdateProfile, step.meta(), None)
  }

  fn supports(&self, action: Action) -> bool {
    !self.unsupported.contains(&action)
  }
}

/// Raw definition for `action` with whatever fields it requires.
pub fn definition(action: Action) -> serde_json::Value {
  match action {
    Action::Cancel => serde_json::json!({"action": "cancel", "token": "tok-1"}),
    Action::Delay => serde_json::json!({"action": "delay", "duration": "10ms"}),
    other => serde_json::json!({"action": other.as_str()}),
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
