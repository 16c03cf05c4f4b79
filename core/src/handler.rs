// stepwise/src/handler.rs

//! Defines the `CommandHandler` trait, the single seam where step effects live,
//! and `NoopHandler`, a handler that performs no effect.

use crate::core::action::Action;
use crate::core::control::StepOutcome;
use crate::core::step::{
  CancelStep, DelayStep, FetchDataStep, InvokeStep, SendListStep, SendStep, UpdateProfileStep,
};
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{event, Level};

/// One operation per action kind. `Step::dispatch` calls exactly one of them.
///
/// No operation has a default body: adding an action kind means adding a `Step`
/// variant and an operation here, and every implementation must follow.
///
/// Implementations are responsible for the side effect only. The status transition
/// that follows is applied by the runner from the returned `StepOutcome`.
#[async_trait]
pub trait CommandHandler: Send + Sync {
  /// Error returned by handler operations. The runner wraps it in `StepError::Dispatch`.
  type Error: std::error::Error + Send + Sync + 'static;

  async fn cancel(&self, step: &CancelStep) -> Result<StepOutcome, Self::Error>;

  async fn delay(&self, step: &DelayStep) -> Result<StepOutcome, Self::Error>;

  async fn fetch_data(&self, step: &FetchDataStep) -> Result<StepOutcome, Self::Error>;

  async fn send(&self, step: &SendStep) -> Result<StepOutcome, Self::Error>;

  async fn send_list(&self, step: &SendListStep) -> Result<StepOutcome, Self::Error>;

  async fn invoke(&self, step: &InvokeStep) -> Result<StepOutcome, Self::Error>;

  async fn update_profile(&self, step: &UpdateProfileStep) -> Result<StepOutcome, Self::Error>;

  /// Whether this handler accepts steps of `action`. The runner checks a whole
  /// sequence against this before dispatching anything.
  fn supports(&self, _action: Action) -> bool {
    true
  }
}

/// Accepts every step and reports it processed without doing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl NoopHandler {
  fn record(action: Action, meta: &crate::core::meta::StepMeta) -> Result<StepOutcome, Infallible> {
    event!(Level::DEBUG, %action, step_id = %meta.step_id(), run_id = %meta.run_id(), "No-op command.");
    Ok(StepOutcome::Processed)
  }
}

#[async_trait]
impl CommandHandler for NoopHandler {
  type Error = Infallible;

  async fn cancel(&self, step: &CancelStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::Cancel, step.meta())
  }

  async fn delay(&self, step: &DelayStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::Delay, step.meta())
  }

  async fn fetch_data(&self, step: &FetchDataStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::FetchData, step.meta())
  }

  async fn send(&self, step: &SendStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::Send, step.meta())
  }

  async fn send_list(&self, step: &SendListStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::SendList, step.meta())
  }

  async fn invoke(&self, step: &InvokeStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::Invoke, step.meta())
  }

  async fn update_profile(&self, step: &UpdateProfileStep) -> Result<StepOutcome, Self::Error> {
    Self::record(Action::UpdateProfile, step.meta())
  }
}
