// stepwise/src/run/mod.rs

//! Defines the `Run` step sequence and the `StepRunner` that executes it.

pub mod config;
pub mod execution;
pub mod sequence;

pub use config::{FailurePolicy, RunnerConfig};
pub use execution::StepRunner;
pub use sequence::Run;
