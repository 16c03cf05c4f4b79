// stepwise/src/run/execution.rs

//! Contains the `StepRunner`, which dispatches an ordered step sequence to a
//! `CommandHandler`, one step at a time, and records each step's status.

use crate::core::control::{RunReport, RunResult, StepOutcome};
use crate::core::status::StepStatus;
use crate::core::step::Step;
use crate::error::{StepError, StepResult};
use crate::handler::CommandHandler;
use crate::run::config::{FailurePolicy, RunnerConfig};
use crate::run::sequence::Run;
use tracing::{event, instrument, Instrument, Level};

#[derive(Debug, Clone, Default)]
pub struct StepRunner {
  config: RunnerConfig,
}

impl StepRunner {
  pub fn new(config: RunnerConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &RunnerConfig {
    &self.config
  }

  /// Runs every step of `run` against `handler`. See [`StepRunner::run`].
  pub async fn run_sequence<H>(&self, run: &mut Run, handler: &H) -> StepResult<RunReport>
  where
    H: CommandHandler + ?Sized,
  {
    self.run(&mut run.steps, handler).await
  }

  /// Dispatches `steps` to `handler` in order, each exactly once.
  ///
  /// Before anything is dispatched, every step's action is checked against
  /// `handler.supports`; an unsupported action fails the whole call with
  /// `StepError::UnknownAction`.
  ///
  /// Steps already in a terminal status are passed over. A `WAITING` step is
  /// resumed and dispatched again. When a handler reports `StepOutcome::Waiting`
  /// the run suspends at that step and the remaining steps are not touched.
  ///
  /// A failing handler operation marks its step `ERROR`. Under `FailurePolicy::Halt`
  /// the resulting `StepError::Dispatch` is returned at once; under
  /// `FailurePolicy::Continue` it is collected into the report.
  #[instrument(
    name = "StepRunner::run",
    skip_all,
    fields(
      num_steps = steps.len(),
      failure_policy = ?self.config.failure_policy,
      handler_type = %std::any::type_name::<H>(),
    ),
    err(Display)
  )]
  pub async fn run<H>(&self, steps: &mut [Step], handler: &H) -> StepResult<RunReport>
  where
    H: CommandHandler + ?Sized,
  {
    self.preflight(steps, handler)?;
    event!(Level::DEBUG, "Step run starting.");

    let mut report = RunReport {
      result: RunResult::Completed,
      dispatched: 0,
      failures: Vec::new(),
    };

    for (step_idx, step) in steps.iter_mut().enumerate() {
      let step_span = tracing::info_span!(
        "step_dispatch",
        step_index = step_idx,
        step_id = %step.id(),
        run_id = %step.run_id(),
        action = %step.action(),
      );

      let status = step.meta().status();
      if status.is_terminal() {
        event!(parent: &step_span, Level::DEBUG, %status, "Step already terminal, not re-entered.");
        continue;
      }

      step.meta_mut().transition(StepStatus::Processing)?;
      let outcome = step.dispatch(handler).instrument(step_span.clone()).await;
      report.dispatched += 1;

      match outcome {
        Ok(StepOutcome::Waiting) => {
          step.meta_mut().transition(StepStatus::Waiting)?;
          event!(parent: &step_span, Level::INFO, "Step is waiting, run suspended.");
          report.result = RunResult::Suspended { step_id: step.id() };
          return Ok(report);
        }
        Ok(outcome) => {
          step.meta_mut().transition(outcome.status())?;
          event!(parent: &step_span, Level::DEBUG, status = %outcome.status(), "Step dispatched.");
        }
        Err(e) => {
          step.meta_mut().transition(StepStatus::Error)?;
          event!(parent: &step_span, Level::ERROR, error = %e, "Handler operation failed.");
          let dispatch_err = StepError::Dispatch {
            step_id: step.id(),
            run_id: step.run_id(),
            action: step.action(),
            source: anyhow::Error::new(e),
          };
          match self.config.failure_policy {
            FailurePolicy::Halt => return Err(dispatch_err),
            FailurePolicy::Continue => report.failures.push(dispatch_err),
          }
        }
      }
    }

    event!(Level::DEBUG, dispatched = report.dispatched, failures = report.failures.len(), "Step run completed.");
    Ok(report)
  }

  /// Fails fast if any step carries an action the handler does not accept.
  fn preflight<H>(&self, steps: &[Step], handler: &H) -> StepResult<()>
  where
    H: CommandHandler + ?Sized,
  {
    if let Some(step) = steps.iter().find(|s| !handler.supports(s.action())) {
      event!(Level::ERROR, step_id = %step.id(), action = %step.action(), "Handler does not support action.");
      return Err(StepError::UnknownAction {
        action: step.action().to_string(),
      });
    }
    Ok(())
  }
}
