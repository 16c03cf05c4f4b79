// workflow_runner/src/handler.rs

//! The demo's `CommandHandler`: logs every effect, sleeps for short delays and
//! propagates cancellation through a shared token registry.

use crate::errors::CommandError;
use crate::tokens::TokenRegistry;
use async_trait::async_trait;
use std::time::Duration;
use stepwise::{
  CancelStep, CommandHandler, DelayStep, FetchDataStep, InvokeStep, SendListStep, SendStep, StepMeta, StepOutcome,
  UpdateProfileStep,
};
use tracing::{info, warn};

pub struct AppCommandHandler {
  tokens: TokenRegistry,
  max_delay: Duration,
}

impl AppCommandHandler {
  pub fn new(tokens: TokenRegistry, max_delay: Duration) -> Self {
    Self { tokens, max_delay }
  }

  /// Steps whose context names a cancelled `cancelToken` are skipped.
  fn cancelled_token<'a>(&self, meta: &'a StepMeta) -> Option<&'a str> {
    meta
      .context()
      .and_then(|ctx| ctx.get("cancelToken"))
      .and_then(|v| v.as_str())
      .filter(|token| self.tokens.is_cancelled(token))
  }

  fn perform(&self, what: &str, meta: &StepMeta) -> Result<StepOutcome, CommandError> {
    if let Some(token) = self.cancelled_token(meta) {
      warn!(step_id = %meta.step_id(), %token, "{} skipped, token cancelled.", what);
      return Ok(StepOutcome::Skipped);
    }
    let context = meta.context().map(|c| serde_json::Value::Object(c.clone()));
    info!(step_id = %meta.step_id(), context = ?context, "{}", what);
    Ok(StepOutcome::Processed)
  }
}

#[async_trait]
impl CommandHandler for AppCommandHandler {
  type Error = CommandError;

  async fn cancel(&self, step: &CancelStep) -> Result<StepOutcome, Self::Error> {
    if self.tokens.cancel(step.token()) {
      info!(step_id = %step.meta().step_id(), token = step.token(), "Token cancelled.");
    } else {
      info!(token = step.token(), "Token was already cancelled.");
    }
    Ok(StepOutcome::Processed)
  }

  async fn delay(&self, step: &DelayStep) -> Result<StepOutcome, Self::Error> {
    if let Some(token) = self.cancelled_token(step.meta()) {
      warn!(%token, "Delay skipped, token cancelled.");
      return Ok(StepOutcome::Skipped);
    }
    let duration = parse_duration(step.duration())?;
    if duration > self.max_delay {
      info!(?duration, max = ?self.max_delay, "Delay exceeds in-process limit, leaving step waiting.");
      return Ok(StepOutcome::Waiting);
    }
    info!(?duration, "Delaying.");
    tokio::time::sleep(duration).await;
    Ok(StepOutcome::Processed)
  }

  async fn fetch_data(&self, step: &FetchDataStep) -> Result<StepOutcome, Self::Error> {
    self.perform("Fetching data.", step.meta())
  }

  async fn send(&self, step: &SendStep) -> Result<StepOutcome, Self::Error> {
    self.perform("Sending message.", step.meta())
  }

  async fn send_list(&self, step: &SendListStep) -> Result<StepOutcome, Self::Error> {
    self.perform("Sending to list.", step.meta())
  }

  async fn invoke(&self, step: &InvokeStep) -> Result<StepOutcome, Self::Error> {
    self.perform("Invoking function.", step.meta())
  }

  async fn update_profile(&self, step: &UpdateProfileStep) -> Result<StepOutcome, Self::Error> {
    self.perform("Updating profile.", step.meta())
  }
}

/// Parses `<number><unit>` with unit `ms`, `s`, `m` or `h`.
pub fn parse_duration(raw: &str) -> Result<Duration, CommandError> {
  let invalid = |reason: &str| CommandError::InvalidDuration {
    duration: raw.to_string(),
    reason: reason.to_string(),
  };

  let trimmed = raw.trim();
  let split = trimmed
    .find(|c: char| !c.is_ascii_digit())
    .ok_or_else(|| invalid("missing unit (ms, s, m, h)"))?;
  let (amount, unit) = trimmed.split_at(split);
  let amount: u64 = amount.parse().map_err(|_| invalid("missing amount"))?;

  let millis = match unit {
    "ms" => Some(amount),
    "s" => amount.checked_mul(1_000),
    "m" => amount.checked_mul(60_000),
    "h" => amount.checked_mul(3_600_000),
    _ => return Err(invalid("unknown unit")),
  };
  millis
    .map(Duration::from_millis)
    .ok_or_else(|| invalid("too large"))
}
