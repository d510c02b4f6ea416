// src/engine/run_state.rs

//! Per-run scheduling state.

use std::collections::HashSet;
use std::sync::Arc;

use crate::dag::{CompiledJob, Plan};
use crate::engine::{Dispatch, RunReport};
use crate::types::{JobName, OutcomeName};

/// State owned by a single run: which jobs were dispatched, which outcomes
/// are satisfied, and which jobs are still waiting.
///
/// Created fresh from the plan at the start of every run.
pub struct RunState<C> {
    ran: HashSet<JobName>,
    has: HashSet<OutcomeName>,
    remaining: Vec<Arc<CompiledJob<C>>>,
    dispatched: Vec<JobName>,
    invoked: Vec<JobName>,
    skipped: Vec<JobName>,
}

impl<C> RunState<C> {
    pub fn new(plan: &Plan<C>) -> Self {
        Self {
            ran: HashSet::with_capacity(plan.len()),
            has: HashSet::new(),
            remaining: plan.jobs().to_vec(),
            dispatched: Vec::with_capacity(plan.len()),
            invoked: Vec::with_capacity(plan.len()),
            skipped: Vec::new(),
        }
    }

    /// Every job this one must follow has been dispatched and every outcome
    /// it requires is satisfied.
    pub fn can_run(&self, job: &CompiledJob<C>) -> bool {
        job.must_follow.iter().all(|name| self.ran.contains(name))
            && job.requires.iter().all(|outcome| self.has.contains(outcome))
    }

    /// Decide whether an eligible job is worth invoking.
    pub fn should_run(&self, job: &CompiledJob<C>) -> Dispatch {
        if job.notif.iter().any(|outcome| self.has.contains(outcome)) {
            Dispatch::SkipNotif
        } else if job.provides.iter().all(|outcome| self.has.contains(outcome)) {
            Dispatch::SkipRedundant
        } else {
            Dispatch::Run
        }
    }

    /// Remove the first eligible job from `remaining`, mark it dispatched and
    /// return it together with the run/skip decision.
    ///
    /// Always scans from the start: an outcome announced by the previous job
    /// may have unblocked an earlier entry.
    pub fn take_next(&mut self) -> Option<(Arc<CompiledJob<C>>, Dispatch)> {
        let idx = self.remaining.iter().position(|job| self.can_run(job))?;
        let job = self.remaining.remove(idx);
        let decision = self.should_run(&job);

        self.ran.insert(job.name.clone());
        self.dispatched.push(job.name.clone());
        if decision.is_run() {
            self.invoked.push(job.name.clone());
        } else {
            self.skipped.push(job.name.clone());
        }

        Some((job, decision))
    }

    pub fn announce(&mut self, outcomes: impl IntoIterator<Item = OutcomeName>) {
        self.has.extend(outcomes);
    }

    pub fn has(&self) -> &HashSet<OutcomeName> {
        &self.has
    }

    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.remaining.iter().map(|job| job.name.as_str())
    }

    pub fn report(&self, run_id: u64) -> RunReport {
        RunReport {
            run_id,
            has: self.has.iter().cloned().collect(),
            ran: self.dispatched.clone(),
            invoked: self.invoked.clone(),
            skipped: self.skipped.clone(),
            residual: self.remaining().map(str::to_string).collect(),
        }
    }
}
