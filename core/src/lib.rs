// src/lib.rs

//! Stepwise: a typed, schema-validated step-execution pipeline.
//!
//! A workflow is an ordered sequence of steps, each tagged with an action kind
//! (`cancel`, `delay`, `fetch-data`, `send`, `send-list`, `invoke`,
//! `update-profile`). Steps are built from raw JSON definitions that must pass
//! their kind's schema check, then dispatched one at a time to a
//! `CommandHandler`, the single place where effects are defined.
//!
//!  - `Step` is a sum type; `Step::dispatch` matches the variant and calls the
//!    one handler operation for it.
//!  - `Run` owns a step sequence and assigns prev/next links.
//!  - `StepRunner` dispatches a sequence in order, records status transitions,
//!    suspends on `WAITING` and applies the configured `FailurePolicy`.

pub mod core;
pub mod error;
pub mod handler;
pub mod run;
pub mod schema;

// --- Re-exports for the Public API ---

pub use crate::core::action::Action;
pub use crate::core::control::{RunReport, RunResult, StepOutcome};
pub use crate::core::meta::{ExecutionContext, RunId, StatusChange, StepId, StepMeta};
pub use crate::core::status::StepStatus;
pub use crate::core::step::{
  CancelStep, DelayStep, FetchDataStep, InvokeStep, SendListStep, SendStep, Step, UpdateProfileStep,
};

pub use crate::schema::{CancelSchema, DelaySchema};

pub use crate::handler::{CommandHandler, NoopHandler};

pub use crate::run::{FailurePolicy, Run, RunnerConfig, StepRunner};

pub use crate::error::{StepError, StepResult};

/*
    Core Workflow:
    1. Implement `CommandHandler` for your effects (one async operation per action kind).
    2. Build a `Run`, either with `Run::from_definitions(&[json!(...)])` or by
       calling `run.push_raw(...)` per definition. Invalid definitions fail here.
    3. Create a `StepRunner` with a `RunnerConfig` and call
       `runner.run_sequence(&mut run, &handler).await`.
    4. Inspect the returned `RunReport` and each step's `meta().status()` / `history()`.
       A `RunResult::Suspended` run is resumed by running it again.
*/
