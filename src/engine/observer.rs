// src/engine/observer.rs

//! Diagnostic sink for compile and run events.
//!
//! The scheduler never depends on what an observer does with these events;
//! the default [`TracingObserver`] turns them into `tracing` events and tests
//! can substitute a recording implementation.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::engine::RunReport;
use crate::types::OutcomeName;

/// What the scheduler decided for an eligible job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The job's callback is invoked.
    Run,
    /// One of the job's `notif` outcomes is already satisfied.
    SkipNotif,
    /// Every outcome the job provides is already satisfied.
    SkipRedundant,
}

impl Dispatch {
    pub fn is_run(self) -> bool {
        matches!(self, Dispatch::Run)
    }
}

/// Advisory diagnostics emitted by the compiler and the scheduler.
///
/// All methods default to no-ops.
pub trait RunObserver: Send + Sync {
    /// A job was pruned at compile time because nothing provides `missing`.
    fn job_discarded(&self, _job: &str, _missing: &[OutcomeName]) {}

    fn run_started(&self, _run_id: u64, _jobs: usize) {}

    /// Called for every dispatched job, with the outcomes satisfied so far.
    fn dispatched(
        &self,
        _run_id: u64,
        _job: &str,
        _decision: Dispatch,
        _has: &HashSet<OutcomeName>,
    ) {
    }

    /// Called once, when no remaining job is eligible.
    fn run_finished(&self, _run_id: u64, _report: &RunReport) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Default observer: forwards events to `tracing`.
///
/// Per-run events are logged at `debug` so that executing a plan many times
/// does not flood the log at the default level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn job_discarded(&self, job: &str, missing: &[OutcomeName]) {
        warn!(
            job = %job,
            ?missing,
            "discarding job: required outcomes are provided by no job"
        );
    }

    fn run_started(&self, run_id: u64, jobs: usize) {
        debug!(run_id, jobs, "run started");
    }

    fn dispatched(
        &self,
        run_id: u64,
        job: &str,
        decision: Dispatch,
        has: &HashSet<OutcomeName>,
    ) {
        match decision {
            Dispatch::Run => debug!(run_id, job = %job, ?has, "running job"),
            Dispatch::SkipNotif => {
                debug!(run_id, job = %job, ?has, "skipping job: notif outcome already satisfied")
            }
            Dispatch::SkipRedundant => {
                debug!(run_id, job = %job, ?has, "skipping job: everything it provides is satisfied")
            }
        }
    }

    fn run_finished(&self, run_id: u64, report: &RunReport) {
        if report.residual.is_empty() {
            debug!(run_id, ran = report.ran.len(), "run finished");
        } else {
            info!(
                run_id,
                residual = ?report.residual,
                "run finished with jobs that never became eligible"
            );
        }
    }
}
