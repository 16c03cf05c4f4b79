// stepwise/src/schema.rs

//! Schema validators for raw step definitions.
//!
//! A raw definition is a JSON object carrying an `action` field plus the fields
//! required by that action kind. Validation is all-or-nothing: either the whole
//! required shape is present or the definition is rejected.

use crate::core::action::Action;
use crate::core::meta::ExecutionContext;
use crate::error::{StepError, StepResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Required shape of a `cancel` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelSchema {
  pub token: String,
}

/// Required shape of a `delay` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelaySchema {
  pub duration: String,
}

impl CancelSchema {
  pub fn new(token: impl Into<String>) -> Self {
    Self { token: token.into() }
  }

  pub(crate) fn check(&self) -> StepResult<()> {
    require_non_empty(Action::Cancel, "token", &self.token)
  }
}

impl DelaySchema {
  pub fn new(duration: impl Into<String>) -> Self {
    Self {
      duration: duration.into(),
    }
  }

  pub(crate) fn check(&self) -> StepResult<()> {
    require_non_empty(Action::Delay, "duration", &self.duration)
  }
}

/// Fields each action kind requires, besides `action` itself.
pub fn required_fields(action: Action) -> &'static [&'static str] {
  match action {
    Action::Cancel => &["token"],
    Action::Delay => &["duration"],
    Action::FetchData | Action::Send | Action::SendList | Action::Invoke | Action::UpdateProfile => &[],
  }
}

/// Pure predicate: does `raw` satisfy the shape required for `action`?
pub fn validate(action: Action, raw: &Value) -> bool {
  check(action, raw).is_ok()
}

/// Same rule as [`validate`], reporting the first offending field.
pub fn check(action: Action, raw: &Value) -> StepResult<()> {
  let object = raw
    .as_object()
    .ok_or_else(|| StepError::validation(Some(action), "definition", "must be a JSON object"))?;

  for field in required_fields(action) {
    match object.get(*field) {
      None | Some(Value::Null) => return Err(StepError::validation(Some(action), *field, "is required")),
      Some(Value::String(s)) => require_non_empty(action, field, s)?,
      Some(_) => return Err(StepError::validation(Some(action), *field, "must be a string")),
    }
  }
  Ok(())
}

/// Reads the `action` field of a raw definition.
pub fn action_of(raw: &Value) -> StepResult<Action> {
  match raw.get("action") {
    None | Some(Value::Null) => Err(StepError::validation(None, "action", "is required")),
    Some(Value::String(name)) => name.parse(),
    Some(_) => Err(StepError::validation(None, "action", "must be a string")),
  }
}

/// Reads the optional `context` object of a raw definition.
pub(crate) fn context_of(action: Action, raw: &Value) -> StepResult<Option<ExecutionContext>> {
  match raw.get("context") {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Object(map)) => Ok(Some(map.clone())),
    Some(_) => Err(StepError::validation(Some(action), "context", "must be a JSON object")),
  }
}

/// Deserializes the typed schema for `action` from an already-checked definition.
pub(crate) fn parse<T: serde::de::DeserializeOwned>(action: Action, raw: &Value) -> StepResult<T> {
  T::deserialize(raw).map_err(|e| StepError::validation(Some(action), "definition", e.to_string()))
}

fn require_non_empty(action: Action, field: &str, value: &str) -> StepResult<()> {
  if value.is_empty() {
    return Err(StepError::validation(Some(action), field, "must not be empty"));
  }
  Ok(())
}
