pub mod action;
pub mod control;
pub mod meta;
pub mod status;
pub mod step;

// Re-export key types for easier access from other modules (and lib.rs)
pub use action::Action;
pub use control::{RunReport, RunResult, StepOutcome};
pub use meta::{ExecutionContext, RunId, StatusChange, StepId, StepMeta};
pub use status::StepStatus;
pub use step::Step;
