// stepwise/src/core/action.rs

//! The closed set of action kinds a step can carry.

use crate::error::StepError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action kind of a step. Each kind maps to exactly one `CommandHandler` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
  Cancel,
  Delay,
  FetchData,
  Send,
  SendList,
  Invoke,
  UpdateProfile,
}

impl Action {
  /// Every action kind, in declaration order.
  pub const ALL: [Action; 7] = [
    Action::Cancel,
    Action::Delay,
    Action::FetchData,
    Action::Send,
    Action::SendList,
    Action::Invoke,
    Action::UpdateProfile,
  ];

  /// Wire name as it appears in the `action` field of a raw definition.
  pub fn as_str(self) -> &'static str {
    match self {
      Action::Cancel => "cancel",
      Action::Delay => "delay",
      Action::FetchData => "fetch-data",
      Action::Send => "send",
      Action::SendList => "send-list",
      Action::Invoke => "invoke",
      Action::UpdateProfile => "update-profile",
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Action {
  type Err = StepError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Action::ALL
      .into_iter()
      .find(|action| action.as_str() == s)
      .ok_or_else(|| StepError::UnknownAction { action: s.to_string() })
  }
}
