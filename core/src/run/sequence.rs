// stepwise/src/run/sequence.rs

//! Contains the `Run` struct: the ordered, exclusively owned step sequence of one
//! workflow execution, and the only place prev/next links are assigned.

use crate::core::meta::{RunId, StepId};
use crate::core::status::StepStatus;
use crate::core::step::Step;
use crate::error::{StepError, StepResult};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{event, Level};

#[derive(Debug)]
pub struct Run {
  run_id: RunId,
  tenant_id: Option<String>,
  pub(crate) steps: Vec<Step>,
}

impl Run {
  pub fn new() -> Self {
    Self {
      run_id: RunId::generate(),
      tenant_id: None,
      steps: Vec::new(),
    }
  }

  pub fn with_tenant(tenant_id: impl Into<String>) -> Self {
    Self {
      tenant_id: Some(tenant_id.into()),
      ..Self::new()
    }
  }

  /// Builds a whole run from raw definitions. Fails on the first invalid definition;
  /// no partial run is returned.
  pub fn from_definitions(definitions: &[Value]) -> StepResult<Self> {
    let mut run = Self::new();
    run.extend_raw(definitions)?;
    Ok(run)
  }

  pub fn run_id(&self) -> RunId {
    self.run_id
  }

  pub fn tenant_id(&self) -> Option<&str> {
    self.tenant_id.as_deref()
  }

  /// Validates `raw`, builds a step owned by this run, and appends it.
  pub fn push_raw(&mut self, raw: &Value) -> StepResult<StepId> {
    let step = Step::from_raw_in(raw, self.run_id, self.tenant_id.clone())?;
    self.append(step)
  }

  pub fn extend_raw(&mut self, definitions: &[Value]) -> StepResult<()> {
    // Build everything first so a bad definition leaves the run unchanged.
    let built = definitions
      .iter()
      .map(|raw| Step::from_raw_in(raw, self.run_id, self.tenant_id.clone()))
      .collect::<StepResult<Vec<_>>>()?;
    for step in built {
      self.append(step)?;
    }
    Ok(())
  }

  /// Appends a step built elsewhere. It must belong to this run, carry the run's
  /// tenant, and not be linked yet. Typed constructors build untenanted steps, so a
  /// tenanted run only takes steps through `push_raw` or `extend_raw`.
  pub fn push(&mut self, step: Step) -> StepResult<StepId> {
    if step.run_id() != self.run_id {
      return Err(StepError::Configuration {
        message: format!(
          "step {} belongs to run {}, not run {}",
          step.id(),
          step.run_id(),
          self.run_id
        ),
      });
    }
    if step.meta().tenant_id() != self.tenant_id() {
      return Err(StepError::Configuration {
        message: format!(
          "step {} has tenant {:?}, run {} has tenant {:?}",
          step.id(),
          step.meta().tenant_id(),
          self.run_id,
          self.tenant_id()
        ),
      });
    }
    if step.meta().is_linked() || self.get(step.id()).is_some() {
      return Err(StepError::Configuration {
        message: format!("step {} is already part of a sequence", step.id()),
      });
    }
    self.append(step)
  }

  fn append(&mut self, mut step: Step) -> StepResult<StepId> {
    let new_id = step.id();
    if let Some(last) = self.steps.last_mut() {
      last.meta_mut().link_next(new_id)?;
      step.meta_mut().link_prev(last.id())?;
    }
    event!(Level::DEBUG, run_id = %self.run_id, step_id = %new_id, action = %step.action(), "Step appended to run.");
    self.steps.push(step);
    Ok(new_id)
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn get(&self, step_id: StepId) -> Option<&Step> {
    self.steps.iter().find(|s| s.id() == step_id)
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// True once every step has reached a terminal status.
  pub fn is_finished(&self) -> bool {
    self.steps.iter().all(|s| s.meta().status().is_terminal())
  }

  pub fn status_counts(&self) -> HashMap<StepStatus, usize> {
    let mut counts = HashMap::new();
    for step in &self.steps {
      *counts.entry(step.meta().status()).or_insert(0) += 1;
    }
    counts
  }
}

impl Default for Run {
  fn default() -> Self {
    Self::new()
  }
}
