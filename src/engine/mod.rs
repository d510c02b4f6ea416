// src/engine/mod.rs

//! Run-time scheduler.
//!
//! - [`run_state`] holds the per-run sets (`ran`, `has`, `remaining`) and the
//!   eligibility / execution-worthiness checks.
//! - [`continuation`] defines the [`Done`] and [`Next`] capabilities passed to
//!   job callbacks.
//! - [`runtime`] drives a single cooperative pass over a plan.
//! - [`observer`] is the diagnostic seam ([`RunObserver`]).
//! - [`report`] describes the result of a run.

pub mod continuation;
pub mod observer;
pub mod report;
pub mod run_state;
pub mod runtime;

pub use continuation::{Done, Next};
pub use observer::{Dispatch, NoopObserver, RunObserver, TracingObserver};
pub use report::RunReport;
pub use run_state::RunState;
pub use runtime::{RunHandle, execute};
