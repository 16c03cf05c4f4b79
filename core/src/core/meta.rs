// stepwise/src/core/meta.rs

//! Identifiers, timestamps, status history and sequencing links shared by every step variant.
//!
//! Everything here is read-only from outside the crate. Status transitions and link
//! assignment go through `pub(crate)` methods so that the run sequencer and the
//! runner stay the only writers.

use crate::core::status::StepStatus;
use crate::error::{StepError, StepResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Free-form execution context attached to a step.
pub type ExecutionContext = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StepId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl StepId {
  pub(crate) fn generate() -> Self {
    StepId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }
}

impl RunId {
  pub fn generate() -> Self {
    RunId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }
}

impl From<Uuid> for RunId {
  fn from(id: Uuid) -> Self {
    RunId(id)
  }
}

impl fmt::Display for StepId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl fmt::Display for RunId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// One recorded status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
  pub from: StepStatus,
  pub to: StepStatus,
  pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMeta {
  step_id: StepId,
  run_id: RunId,
  #[serde(skip_serializing_if = "Option::is_none")]
  tenant_id: Option<String>,
  created: DateTime<Utc>,
  updated: DateTime<Utc>,
  status: StepStatus,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  history: Vec<StatusChange>,
  #[serde(skip_serializing_if = "Option::is_none")]
  next_step_id: Option<StepId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  prev_step_id: Option<StepId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  context: Option<ExecutionContext>,
}

impl StepMeta {
  pub(crate) fn new(run_id: RunId, tenant_id: Option<String>, context: Option<ExecutionContext>) -> Self {
    let now = Utc::now();
    Self {
      step_id: StepId::generate(),
      run_id,
      tenant_id,
      created: now,
      updated: now,
      status: StepStatus::NotProcessed,
      history: Vec::new(),
      next_step_id: None,
      prev_step_id: None,
      context,
    }
  }

  pub fn step_id(&self) -> StepId {
    self.step_id
  }

  pub fn run_id(&self) -> RunId {
    self.run_id
  }

  pub fn tenant_id(&self) -> Option<&str> {
    self.tenant_id.as_deref()
  }

  pub fn created(&self) -> DateTime<Utc> {
    self.created
  }

  pub fn updated(&self) -> DateTime<Utc> {
    self.updated
  }

  pub fn status(&self) -> StepStatus {
    self.status
  }

  /// Every transition this step went through, oldest first.
  pub fn history(&self) -> &[StatusChange] {
    &self.history
  }

  pub fn next_step_id(&self) -> Option<StepId> {
    self.next_step_id
  }

  pub fn prev_step_id(&self) -> Option<StepId> {
    self.prev_step_id
  }

  pub fn context(&self) -> Option<&ExecutionContext> {
    self.context.as_ref()
  }

  pub(crate) fn is_linked(&self) -> bool {
    self.next_step_id.is_some() || self.prev_step_id.is_some()
  }

  /// Moves to `to`, recording the change. Disallowed transitions leave the step untouched.
  pub(crate) fn transition(&mut self, to: StepStatus) -> StepResult<()> {
    let from = self.status;
    if !from.can_transition_to(to) {
      return Err(StepError::InvalidTransition {
        step_id: self.step_id,
        from,
        to,
      });
    }
    let at = Utc::now();
    self.history.push(StatusChange { from, to, at });
    self.status = to;
    self.updated = at;
    Ok(())
  }

  pub(crate) fn link_next(&mut self, next: StepId) -> StepResult<()> {
    if let Some(existing) = self.next_step_id {
      return Err(StepError::Configuration {
        message: format!("step {} is already linked to next step {}", self.step_id, existing),
      });
    }
    self.next_step_id = Some(next);
    Ok(())
  }

  pub(crate) fn link_prev(&mut self, prev: StepId) -> StepResult<()> {
    if let Some(existing) = self.prev_step_id {
      return Err(StepError::Configuration {
        message: format!("step {} is already linked to previous step {}", self.step_id, existing),
      });
    }
    self.prev_step_id = Some(prev);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_meta_starts_not_processed_and_unlinked() {
    let meta = StepMeta::new(RunId::generate(), None, None);
    assert_eq!(meta.status(), StepStatus::NotProcessed);
    assert!(meta.history().is_empty());
    assert!(!meta.is_linked());
    assert_eq!(meta.created(), meta.updated());
  }

  #[test]
  fn transitions_are_recorded_in_order() {
    let mut meta = StepMeta::new(RunId::generate(), Some("acme".into()), None);
    meta.transition(StepStatus::Processing).unwrap();
    meta.transition(StepStatus::Processed).unwrap();

    let seen: Vec<_> = meta.history().iter().map(|c| (c.from, c.to)).collect();
    assert_eq!(
      seen,
      vec![
        (StepStatus::NotProcessed, StepStatus::Processing),
        (StepStatus::Processing, StepStatus::Processed),
      ]
    );
    assert_eq!(meta.tenant_id(), Some("acme"));
  }

  #[test]
  fn rejected_transition_leaves_state_alone() {
    let mut meta = StepMeta::new(RunId::generate(), None, None);
    let err = meta.transition(StepStatus::Processed).unwrap_err();
    assert!(matches!(err, StepError::InvalidTransition { from: StepStatus::NotProcessed, .. }));
    assert_eq!(meta.status(), StepStatus::NotProcessed);
    assert!(meta.history().is_empty());
  }

  #[test]
  fn links_are_set_once() {
    let mut meta = StepMeta::new(RunId::generate(), None, None);
    let other = StepId::generate();
    meta.link_next(other).unwrap();
    assert!(meta.link_next(StepId::generate()).is_err());
    assert_eq!(meta.next_step_id(), Some(other));
  }
}
