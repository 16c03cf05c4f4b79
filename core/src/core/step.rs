// stepwise/src/core/step.rs

//! The step entity set: one struct per action kind, unified by the `Step` sum type.
//!
//! A step holds the data its action needs and knows only how to route itself to
//! the matching `CommandHandler` operation. It never performs the effect itself.

use crate::core::action::Action;
use crate::core::control::StepOutcome;
use crate::core::meta::{ExecutionContext, RunId, StepId, StepMeta};
use crate::error::StepResult;
use crate::handler::CommandHandler;
use crate::schema::{self, CancelSchema, DelaySchema};
use serde::Serialize;
use serde_json::Value;

/// Signals that the work associated with `token` should stop.
#[derive(Debug, Serialize)]
pub struct CancelStep {
  #[serde(flatten)]
  meta: StepMeta,
  token: String,
}

/// Holds the run for `duration`. How the duration string is interpreted is up to the handler.
#[derive(Debug, Serialize)]
pub struct DelayStep {
  #[serde(flatten)]
  meta: StepMeta,
  duration: String,
}

#[derive(Debug, Serialize)]
pub struct FetchDataStep {
  #[serde(flatten)]
  meta: StepMeta,
}

#[derive(Debug, Serialize)]
pub struct SendStep {
  #[serde(flatten)]
  meta: StepMeta,
}

#[derive(Debug, Serialize)]
pub struct SendListStep {
  #[serde(flatten)]
  meta: StepMeta,
}

#[derive(Debug, Serialize)]
pub struct InvokeStep {
  #[serde(flatten)]
  meta: StepMeta,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileStep {
  #[serde(flatten)]
  meta: StepMeta,
}

impl CancelStep {
  pub fn new(schema: CancelSchema, run_id: RunId) -> StepResult<Self> {
    Self::with_meta(schema, StepMeta::new(run_id, None, None))
  }

  fn with_meta(schema: CancelSchema, meta: StepMeta) -> StepResult<Self> {
    schema.check()?;
    let CancelSchema { token } = schema;
    Ok(Self { meta, token })
  }

  pub fn token(&self) -> &str {
    &self.token
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

impl DelayStep {
  pub fn new(schema: DelaySchema, run_id: RunId) -> StepResult<Self> {
    Self::with_meta(schema, StepMeta::new(run_id, None, None))
  }

  fn with_meta(schema: DelaySchema, meta: StepMeta) -> StepResult<Self> {
    schema.check()?;
    let DelaySchema { duration } = schema;
    Ok(Self { meta, duration })
  }

  pub fn duration(&self) -> &str {
    &self.duration
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

impl FetchDataStep {
  pub fn new(run_id: RunId) -> Self {
    Self {
      meta: StepMeta::new(run_id, None, None),
    }
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

impl SendStep {
  pub fn new(run_id: RunId) -> Self {
    Self {
      meta: StepMeta::new(run_id, None, None),
    }
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

impl SendListStep {
  pub fn new(run_id: RunId) -> Self {
    Self {
      meta: StepMeta::new(run_id, None, None),
    }
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

impl InvokeStep {
  pub fn new(run_id: RunId) -> Self {
    Self {
      meta: StepMeta::new(run_id, None, None),
    }
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

impl UpdateProfileStep {
  pub fn new(run_id: RunId) -> Self {
    Self {
      meta: StepMeta::new(run_id, None, None),
    }
  }

  pub fn meta(&self) -> &StepMeta {
    &self.meta
  }
}

/// A live, validated step. The variant is the action kind and cannot change.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
  Cancel(CancelStep),
  Delay(DelayStep),
  FetchData(FetchDataStep),
  Send(SendStep),
  SendList(SendListStep),
  Invoke(InvokeStep),
  UpdateProfile(UpdateProfileStep),
}

impl Step {
  /// Builds a step from a raw definition belonging to `run_id`.
  pub fn from_raw(raw: &Value, run_id: RunId) -> StepResult<Self> {
    Self::from_raw_in(raw, run_id, None)
  }

  pub(crate) fn from_raw_in(raw: &Value, run_id: RunId, tenant_id: Option<String>) -> StepResult<Self> {
    let action = schema::action_of(raw)?;
    schema::check(action, raw)?;
    let context: Option<ExecutionContext> = schema::context_of(action, raw)?;
    let meta = StepMeta::new(run_id, tenant_id, context);

    let step = match action {
      Action::Cancel => Step::Cancel(CancelStep::with_meta(schema::parse(action, raw)?, meta)?),
      Action::Delay => Step::Delay(DelayStep::with_meta(schema::parse(action, raw)?, meta)?),
      Action::FetchData => Step::FetchData(FetchDataStep { meta }),
      Action::Send => Step::Send(SendStep { meta }),
      Action::SendList => Step::SendList(SendListStep { meta }),
      Action::Invoke => Step::Invoke(InvokeStep { meta }),
      Action::UpdateProfile => Step::UpdateProfile(UpdateProfileStep { meta }),
    };
    Ok(step)
  }

  pub fn action(&self) -> Action {
    match self {
      Step::Cancel(_) => Action::Cancel,
      Step::Delay(_) => Action::Delay,
      Step::FetchData(_) => Action::FetchData,
      Step::Send(_) => Action::Send,
      Step::SendList(_) => Action::SendList,
      Step::Invoke(_) => Action::Invoke,
      Step::UpdateProfile(_) => Action::UpdateProfile,
    }
  }

  pub fn meta(&self) -> &StepMeta {
    match self {
      Step::Cancel(s) => &s.meta,
      Step::Delay(s) => &s.meta,
      Step::FetchData(s) => &s.meta,
      Step::Send(s) => &s.meta,
      Step::SendList(s) => &s.meta,
      Step::Invoke(s) => &s.meta,
      Step::UpdateProfile(s) => &s.meta,
    }
  }

  pub(crate) fn meta_mut(&mut self) -> &mut StepMeta {
    match self {
      Step::Cancel(s) => &mut s.meta,
      Step::Delay(s) => &mut s.meta,
      Step::FetchData(s) => &mut s.meta,
      Step::Send(s) => &mut s.meta,
      Step::SendList(s) => &mut s.meta,
      Step::Invoke(s) => &mut s.meta,
      Step::UpdateProfile(s) => &mut s.meta,
    }
  }

  pub fn id(&self) -> StepId {
    self.meta().step_id()
  }

  pub fn run_id(&self) -> RunId {
    self.meta().run_id()
  }

  /// Calls the one handler operation matching this step's action kind, passing the step itself.
  pub async fn dispatch<H>(&self, handler: &H) -> Result<StepOutcome, H::Error>
  where
    H: CommandHandler + ?Sized,
  {
    match self {
      Step::Cancel(s) => handler.cancel(s).await,
      Step::Delay(s) => handler.delay(s).await,
      Step::FetchData(s) => handler.fetch_data(s).await,
      Step::Send(s) => handler.send(s).await,
      Step::SendList(s) => handler.send_list(s).await,
      Step::Invoke(s) => handler.invoke(s).await,
      Step::UpdateProfile(s) => handler.update_profile(s).await,
    }
  }
}

macro_rules! impl_from_variant {
  ($($variant:ident($ty:ty)),+ $(,)?) => {
    $(
      impl From<$ty> for Step {
        fn from(step: $ty) -> Self {
          Step::$variant(step)
        }
      }
    )+
  };
}

impl_from_variant!(
  Cancel(CancelStep),
  Delay(DelayStep),
  FetchData(FetchDataStep),
  Send(SendStep),
  SendList(SendListStep),
  Invoke(InvokeStep),
  UpdateProfile(UpdateProfileStep),
);
